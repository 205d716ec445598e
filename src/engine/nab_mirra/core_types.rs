use std::fmt;
use std::fmt::{Display, Formatter};

// Monotonic frame/tick counter
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TickNumber(pub u64);
impl TickNumber
{
    pub fn increment(&mut self) -> Self { self.0 += 1; *self }
}
impl Display for TickNumber
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result
    {
        Display::fmt(&self.0, f)
    }
}
impl std::ops::Add for TickNumber
{
    type Output = Self;
    fn add(self, other: Self) -> Self { Self(self.0 + other.0) }
}
impl std::ops::Sub for TickNumber
{
    type Output = Self;
    fn sub(self, other: Self) -> Self { Self(self.0 - other.0) }
}
