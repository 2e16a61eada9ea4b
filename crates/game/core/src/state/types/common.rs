use std::fmt;
use std::ops::{Add, Sub};

use crate::env::ConfigError;

/// Continuous 2D coordinate or displacement.
///
/// NaN in either component is the wildcard sentinel ("any"): it is carried
/// through arithmetic and frame transforms untouched and never treated as an
/// error.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise product.
    pub fn hadamard(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    /// Equality that treats two wildcard components as equal.
    pub fn same_as(self, other: Self) -> bool {
        fn same(a: f64, b: f64) -> bool {
            a == b || (a.is_nan() && b.is_nan())
        }
        same(self.x, other.x) && same(self.y, other.y)
    }

    /// Returns the coordinate as a plain array, convenient for serialization.
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<(f64, f64)> for Vector {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Vector {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vector {
    type Output = Vector;
    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Vector;
    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn component(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
            if value.is_nan() {
                write!(f, "any")
            } else {
                write!(f, "{}", value)
            }
        }
        write!(f, "(")?;
        component(f, self.x)?;
        write!(f, ", ")?;
        component(f, self.y)?;
        write!(f, ")")
    }
}

/// Direction of one heading axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub const fn as_f64(self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }

    fn from_f64(value: f64) -> Option<Self> {
        if value == 1.0 {
            Some(Sign::Positive)
        } else if value == -1.0 {
            Some(Sign::Negative)
        } else {
            None
        }
    }
}

/// Axis mirroring of a player frame. Each component is exactly ±1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heading {
    pub x: Sign,
    pub y: Sign,
}

impl Heading {
    /// Heading of the player whose frame coincides with the world frame.
    pub const FORWARD: Self = Self {
        x: Sign::Positive,
        y: Sign::Positive,
    };

    /// Heading that mirrors both axes.
    pub const REVERSED: Self = Self {
        x: Sign::Negative,
        y: Sign::Negative,
    };

    pub const fn new(x: Sign, y: Sign) -> Self {
        Self { x, y }
    }

    pub const fn as_vector(self) -> Vector {
        Vector::new(self.x.as_f64(), self.y.as_f64())
    }
}

impl TryFrom<Vector> for Heading {
    type Error = ConfigError;

    fn try_from(value: Vector) -> Result<Self, Self::Error> {
        match (Sign::from_f64(value.x), Sign::from_f64(value.y)) {
            (Some(x), Some(y)) => Ok(Self { x, y }),
            _ => Err(ConfigError::InvalidHeading { heading: value }),
        }
    }
}

/// A player's reference frame over the board.
///
/// `world = origin + heading ⊙ player` and `player = heading ⊙ (world - origin)`.
/// Because every heading component is ±1 the two maps are inverses of each
/// other, and NaN components pass through both unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub origin: Vector,
    pub heading: Heading,
}

impl Frame {
    /// The world frame itself.
    pub const WORLD: Self = Self {
        origin: Vector::ZERO,
        heading: Heading::FORWARD,
    };

    pub const fn new(origin: Vector, heading: Heading) -> Self {
        Self { origin, heading }
    }

    #[inline]
    pub fn world_from_player(&self, xyp: Vector) -> Vector {
        self.origin + self.heading.as_vector().hadamard(xyp)
    }

    #[inline]
    pub fn player_from_world(&self, xyw: Vector) -> Vector {
        self.heading.as_vector().hadamard(xyw - self.origin)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::WORLD
    }
}

/// Stable identity of a session participant, as assigned by the session layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticipantId(pub u32);

impl ParticipantId {
    /// The referee never owns pieces.
    pub const REFEREE: Self = Self(0);
    pub const PLAYER_ONE: Self = Self(1);
    pub const PLAYER_TWO: Self = Self(2);
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "participant #{}", self.0)
    }
}

/// Which side of the board a player sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PlayerSide {
    One,
    Two,
}

impl PlayerSide {
    pub const fn color(self) -> Color {
        match self {
            PlayerSide::One => Color::Light,
            PlayerSide::Two => Color::Dark,
        }
    }
}

impl TryFrom<ParticipantId> for PlayerSide {
    type Error = ConfigError;

    fn try_from(participant: ParticipantId) -> Result<Self, Self::Error> {
        match participant {
            ParticipantId::PLAYER_ONE => Ok(PlayerSide::One),
            ParticipantId::PLAYER_TWO => Ok(PlayerSide::Two),
            other => Err(ConfigError::UnknownParticipant(other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Color {
    Light,
    Dark,
}

/// Identifier of a piece: the owning side plus a per-player sequence number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PieceId {
    pub owner: PlayerSide,
    pub index: u32,
}

impl PieceId {
    pub const fn new(owner: PlayerSide, index: u32) -> Self {
        Self { owner, index }
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.owner, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_from_player_is_affine() {
        let one = Frame::new(Vector::ZERO, Heading::FORWARD);
        assert_eq!(one.world_from_player(Vector::new(3.0, 4.0)), Vector::new(3.0, 4.0));

        let two = Frame::new(Vector::new(7.0, 7.0), Heading::REVERSED);
        assert_eq!(two.world_from_player(Vector::new(2.0, 2.0)), Vector::new(5.0, 5.0));
        assert_eq!(two.player_from_world(Vector::new(5.0, 5.0)), Vector::new(2.0, 2.0));
    }

    #[test]
    fn mixed_heading_mirrors_one_axis() {
        let frame = Frame::new(
            Vector::new(7.0, 0.0),
            Heading::new(Sign::Negative, Sign::Positive),
        );
        assert_eq!(frame.world_from_player(Vector::new(1.0, 2.0)), Vector::new(6.0, 2.0));
    }

    #[test]
    fn wildcard_passes_through_transforms() {
        let frame = Frame::new(Vector::new(7.0, 7.0), Heading::REVERSED);
        let world = frame.world_from_player(Vector::new(f64::NAN, 2.0));
        assert!(world.x.is_nan());
        assert_eq!(world.y, 5.0);
        assert!(world.same_as(Vector::new(f64::NAN, 5.0)));
    }

    #[test]
    fn heading_rejects_non_unit_components() {
        assert_eq!(
            Heading::try_from(Vector::new(-1.0, 1.0)),
            Ok(Heading::new(Sign::Negative, Sign::Positive))
        );
        assert!(Heading::try_from(Vector::new(0.0, 1.0)).is_err());
        assert!(Heading::try_from(Vector::new(2.0, -1.0)).is_err());
        assert!(Heading::try_from(Vector::new(f64::NAN, 1.0)).is_err());
    }

    #[test]
    fn participant_maps_to_side() {
        assert_eq!(PlayerSide::try_from(ParticipantId::PLAYER_ONE), Ok(PlayerSide::One));
        assert_eq!(PlayerSide::try_from(ParticipantId::PLAYER_TWO), Ok(PlayerSide::Two));
        assert_eq!(
            PlayerSide::try_from(ParticipantId::REFEREE),
            Err(ConfigError::UnknownParticipant(ParticipantId::REFEREE))
        );
    }

    #[test]
    fn vector_display_marks_wildcards() {
        assert_eq!(Vector::new(1.0, f64::NAN).to_string(), "(1, any)");
    }
}
