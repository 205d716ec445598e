mod angle;
pub use angle::*;

mod basis;
pub use basis::*;

mod lerp;
pub use lerp::*;
