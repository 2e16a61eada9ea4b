//! Shared, immutable descriptors parameterizing pieces.
//!
//! One `PieceType` is shared (via `Arc`) by every piece of that type, and one
//! `MoveType`/`PatternType` by every piece type that lists it. None of them
//! expose mutation after construction.

use std::sync::Arc;

use crate::action::waypoint::WaypointExpr;
use crate::config::{MoveTypeParams, PatternTypeParams};

use super::ConfigError;

/// How a move traverses its waypoints.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MoveMode {
    /// Lands on the final waypoint instantly; nothing in between can block it.
    Jump,
    /// Occupies every waypoint in sequence; the consumer stops it at the first obstruction.
    Slide,
}

fn parse_exprs<I, S>(owner: &str, sources: I) -> Result<Vec<WaypointExpr>, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    sources
        .into_iter()
        .map(|source| {
            WaypointExpr::parse(source).map_err(|error| ConfigError::InvalidExpression {
                owner: owner.to_string(),
                error,
            })
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct MoveType {
    name: String,
    mode: MoveMode,
    waypoint_exprs: Vec<WaypointExpr>,
}

impl MoveType {
    /// Creates a move type, parsing every waypoint expression up front.
    pub fn new<I, S>(
        name: impl Into<String>,
        mode: MoveMode,
        waypoints: I,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let waypoint_exprs = parse_exprs(&name, waypoints)?;
        Ok(Self {
            name,
            mode,
            waypoint_exprs,
        })
    }

    pub fn from_params(
        name: impl Into<String>,
        params: &MoveTypeParams,
    ) -> Result<Self, ConfigError> {
        Self::new(name, params.mode, params.waypoints.iter().cloned())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> MoveMode {
        self.mode
    }

    pub fn waypoint_exprs(&self) -> &[WaypointExpr] {
        &self.waypoint_exprs
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PatternType {
    name: String,
    waypoint_exprs: Vec<WaypointExpr>,
    on_complete_exprs: Vec<String>,
    must_complete: bool,
}

impl PatternType {
    pub fn new<I, S>(
        name: impl Into<String>,
        waypoints: I,
        on_complete_exprs: Vec<String>,
        must_complete: bool,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let waypoint_exprs = parse_exprs(&name, waypoints)?;
        Ok(Self {
            name,
            waypoint_exprs,
            on_complete_exprs,
            must_complete,
        })
    }

    pub fn from_params(
        name: impl Into<String>,
        params: &PatternTypeParams,
    ) -> Result<Self, ConfigError> {
        Self::new(
            name,
            params.waypoints.iter().cloned(),
            params.on_complete.clone(),
            params.must_complete,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn waypoint_exprs(&self) -> &[WaypointExpr] {
        &self.waypoint_exprs
    }

    /// Consequences applied when the pattern completes, e.g. `"upgrade knight"`.
    ///
    /// Kept verbatim; the core does not interpret them.
    pub fn on_complete_exprs(&self) -> &[String] {
        &self.on_complete_exprs
    }

    /// A captive pattern: once begun, the piece may not start an unrelated move.
    pub fn must_complete(&self) -> bool {
        self.must_complete
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PieceType {
    name: String,
    radius: f64,
    move_types: Vec<Arc<MoveType>>,
    pattern_types: Vec<Arc<PatternType>>,
    cooldown_sec: f64,
}

impl PieceType {
    /// Creates a piece type.
    ///
    /// Move types keep their order. Pattern types form a set: a repeated name
    /// is kept once, at its first position.
    pub fn new(
        name: impl Into<String>,
        radius: f64,
        move_types: Vec<Arc<MoveType>>,
        pattern_types: Vec<Arc<PatternType>>,
        cooldown_sec: f64,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::InvalidRadius {
                piece: name,
                radius,
            });
        }
        if !(cooldown_sec.is_finite() && cooldown_sec >= 0.0) {
            return Err(ConfigError::InvalidCooldown {
                piece: name,
                cooldown_sec,
            });
        }

        let mut unique: Vec<Arc<PatternType>> = Vec::with_capacity(pattern_types.len());
        for pattern in pattern_types {
            if !unique.iter().any(|seen| seen.name() == pattern.name()) {
                unique.push(pattern);
            }
        }

        Ok(Self {
            name,
            radius,
            move_types,
            pattern_types: unique,
            cooldown_sec,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn move_types(&self) -> &[Arc<MoveType>] {
        &self.move_types
    }

    pub fn pattern_types(&self) -> &[Arc<PatternType>] {
        &self.pattern_types
    }

    /// Seconds a piece of this type must wait between motions.
    pub fn cooldown_sec(&self) -> f64 {
        self.cooldown_sec
    }
}
