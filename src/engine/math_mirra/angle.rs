use std::fmt::{Display, Formatter};
use std::ops::{Add, Mul, Neg, Sub};

use bitcode::{Decode, Encode};

// Angle, stored as radians internally
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Encode, Decode)]
pub struct Angle(f32);
impl Angle
{
    pub const ZERO: Self = Self::from_radians(0.0);
    pub const PI: Self = Self::from_radians(std::f32::consts::PI);
    pub const TWO_PI: Self = Self::from_radians(std::f32::consts::TAU);
    pub const PI_OVER_TWO: Self = Self::from_radians(std::f32::consts::FRAC_PI_2);

    #[inline] #[must_use]
    pub const fn from_radians(radians: f32) -> Self { Self(radians) }
    #[inline] #[must_use]
    pub const fn from_degrees(degrees: f32) -> Self { Self(degrees.to_radians()) }

    #[inline] #[must_use]
    pub const fn to_radians(self) -> f32 { self.0 }
    #[inline] #[must_use]
    pub const fn to_degrees(self) -> f32 { self.0.to_degrees() }

    // Lerp the angle, correctly handling wrapping behavior
    #[must_use]
    pub fn lerp(self, to: Self, t: f32) -> Self
    {
        let diff = (to.0 - self.0) % Self::TWO_PI.0;
        let dist = ((2.0 * diff) % Self::TWO_PI.0) - diff;
        Self(self.0 + dist * t)
    }

    // Clamp into [-limit, +limit]; no wrapping is applied first
    #[inline] #[must_use]
    pub fn clamp_symmetric(self, limit: Self) -> Self
    {
        Self(self.0.clamp(-limit.0.abs(), limit.0.abs()))
    }

    #[inline] #[must_use]
    pub fn clamp(self, min: Self, max: Self) -> Self
    {
        Self(self.0.clamp(min.0, max.0))
    }
}
// Display the angle, by default as radians, alternatively as degrees
impl Display for Angle
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        if f.alternate()
        {
            f.write_fmt(format_args!("{:.1}deg", self.to_degrees()))
        }
        else
        {
            f.write_fmt(format_args!("{:.1}rad", self.to_radians()))
        }
    }
}
impl Neg for Angle
{
    type Output = Self;
    fn neg(self) -> Self { Self(-self.0) }
}
impl Add for Angle
{
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Self(self.0 + rhs.0) }
}
impl Sub for Angle
{
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Self(self.0 - rhs.0) }
}
impl Mul<f32> for Angle
{
    type Output = Self;
    fn mul(self, rhs: f32) -> Self { Self(self.0 * rhs) }
}
