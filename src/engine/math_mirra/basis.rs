use bitcode::{Decode, Encode};
use glam::{Mat3, Quat, Vec3};

// Difference vectors shorter than this cannot produce a usable axis
pub const MIN_AXIS_LENGTH: f32 = 1e-5;

fn unit_axis(v: Vec3) -> Option<Vec3>
{
    if v.length_squared() < (MIN_AXIS_LENGTH * MIN_AXIS_LENGTH)
    {
        return None;
    }
    v.try_normalize()
}

// A local 3-axis frame at a tracked body region.
// The second input axis is NOT re-orthogonalized against the first; the pair
// is assumed near-orthogonal and only the completing axis is derived. All
// world<->local conversions therefore go through the full matrix inverse.
#[derive(Debug, Copy, Clone, PartialEq, Encode, Decode)]
pub struct Basis
{
    pub x: Vec3,
    pub y: Vec3,
    pub z: Vec3,
}
impl Basis
{
    pub const IDENTITY: Self = Self { x: Vec3::X, y: Vec3::Y, z: Vec3::Z };

    // Frame from an x/y axis pair; z completes the frame
    #[must_use]
    pub fn from_xy(x: Vec3, y: Vec3) -> Option<Self>
    {
        let x = unit_axis(x)?;
        let y = unit_axis(y)?;
        let z = unit_axis(x.cross(y))?;
        Some(Self { x, y, z })
    }

    // Frame from an x/z axis pair; y completes the frame
    #[must_use]
    pub fn from_xz(x: Vec3, z: Vec3) -> Option<Self>
    {
        let x = unit_axis(x)?;
        let z = unit_axis(z)?;
        let y = unit_axis(x.cross(z))?;
        Some(Self { x, y, z })
    }

    #[inline] #[must_use]
    pub fn to_mat3(&self) -> Mat3 { Mat3::from_cols(self.x, self.y, self.z) }

    // Express a world-space direction in this frame's coordinates
    #[inline] #[must_use]
    pub fn world_to_local(&self, dir: Vec3) -> Vec3
    {
        self.to_mat3().inverse() * dir
    }

    // Per-axis projection coefficients (dot with each axis)
    #[inline] #[must_use]
    pub fn project(&self, dir: Vec3) -> Vec3
    {
        Vec3::new(dir.dot(self.x), dir.dot(self.y), dir.dot(self.z))
    }

    // Carry the frame along a solved joint rotation before solving the next
    // joint down the chain
    #[inline] #[must_use]
    pub fn rotated(&self, rotation: Quat) -> Self
    {
        Self
        {
            x: rotation * self.x,
            y: rotation * self.y,
            z: rotation * self.z,
        }
    }

    #[inline] #[must_use]
    pub fn flipped_y(self) -> Self { Self { y: -self.y, ..self } }
}
