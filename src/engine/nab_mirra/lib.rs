mod core_types;
pub use core_types::*;

pub mod debugging;
pub mod logging;
