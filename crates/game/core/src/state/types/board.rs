use crate::config::BoardParams;
use crate::env::ConfigError;

use super::Vector;

/// Immutable rectangular extent of the playing field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    width: u32,
    height: u32,
}

impl Board {
    /// Creates a board; both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidBoard { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn from_params(params: &BoardParams) -> Result<Self, ConfigError> {
        Self::new(params.width, params.height)
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    /// World coordinate of the far corner, which is player two's origin.
    pub fn corner(&self) -> Vector {
        Vector::new(f64::from(self.width) - 1.0, f64::from(self.height) - 1.0)
    }

    /// Returns true if a world coordinate lies on the board.
    ///
    /// Wildcard components constrain nothing and are accepted.
    pub fn contains(&self, xyw: Vector) -> bool {
        fn within(value: f64, extent: u32) -> bool {
            value.is_nan() || (value >= 0.0 && value <= f64::from(extent) - 1.0)
        }
        within(xyw.x, self.width) && within(xyw.y, self.height)
    }
}
