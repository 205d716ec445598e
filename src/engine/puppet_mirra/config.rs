use serde::{Deserialize, Serialize};

use crate::filter::{DEFAULT_SMOOTHING, VISIBILITY_BASE, VISIBILITY_FLOOR};

// Animator tuning; every field is optional in TOML and falls back to the
// documented default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig
{
    // EMA factor for bone rotations; higher tracks faster but jitters more
    pub smoothing: f32,
    // EMA factor for morph target weights
    pub morph_smoothing: f32,
    // adaptive visibility gate bounds (see filter::chain_gate)
    pub visibility_floor: f32,
    pub visibility_base: f32,
    // capture aspect (width/height) used to undo landmark normalization
    // anisotropy for hand/face streams
    pub camera_aspect: f32,
    // vertical root travel as a multiple of the user's hip span
    pub root_height_scale: f32,
}
impl Default for AnimatorConfig
{
    fn default() -> Self
    {
        Self
        {
            smoothing: DEFAULT_SMOOTHING,
            morph_smoothing: DEFAULT_SMOOTHING,
            visibility_floor: VISIBILITY_FLOOR,
            visibility_base: VISIBILITY_BASE,
            camera_aspect: 16.0 / 9.0,
            root_height_scale: 1.8,
        }
    }
}
impl AnimatorConfig
{
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error>
    {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn defaults()
    {
        let cfg = AnimatorConfig::default();
        assert_eq!(cfg.smoothing, DEFAULT_SMOOTHING);
        assert_eq!(cfg.visibility_floor, VISIBILITY_FLOOR);
        assert_eq!(cfg.visibility_base, VISIBILITY_BASE);
    }

    #[test]
    fn partial_toml_keeps_defaults()
    {
        let cfg = AnimatorConfig::from_toml("smoothing = 0.5\ncamera_aspect = 1.0\n").unwrap();
        assert_eq!(cfg.smoothing, 0.5);
        assert_eq!(cfg.camera_aspect, 1.0);
        assert_eq!(cfg.morph_smoothing, DEFAULT_SMOOTHING);
        assert_eq!(cfg.root_height_scale, 1.8);
    }

    #[test]
    fn garbage_toml_is_an_error()
    {
        assert!(AnimatorConfig::from_toml("smoothing = \"fast\"").is_err());
    }
}
