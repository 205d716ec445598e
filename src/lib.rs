// Facade over the engine crates: most users want `Avatar` + `LandmarkFrame`
// and nothing else

pub use math_mirra as math;
pub use nab_mirra as nab;
pub use puppet_mirra as puppet;

pub use puppet_mirra::animator::{Animator, Avatar};
pub use puppet_mirra::binding::NamingConvention;
pub use puppet_mirra::config::AnimatorConfig;
pub use puppet_mirra::landmarks::LandmarkFrame;
pub use puppet_mirra::retarget::Retargeter;
pub use puppet_mirra::slot::FrameSlot;
