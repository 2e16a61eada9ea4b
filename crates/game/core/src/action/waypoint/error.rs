//! Waypoint expression errors.
//!
//! Every variant carries the full expression text so content authors can find
//! the offending entry in their configuration.

use crate::error::{ErrorSeverity, GameError};

/// Errors raised while parsing or evaluating a waypoint expression.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExpressionError {
    /// The text is not a well-formed expression.
    #[error("syntax error in waypoint expression `{expr}` at offset {offset}: {message}")]
    Syntax {
        expr: String,
        offset: usize,
        message: String,
    },

    /// The expression evaluated to something that is not a coordinate, a
    /// non-empty list of coordinates, or a non-empty list of non-empty lists
    /// of coordinates.
    #[error(
        "waypoint expression `{expr}` produced {value}; expected a coordinate, a non-empty \
         list of coordinates or a non-empty list of non-empty lists of coordinates"
    )]
    Shape { expr: String, value: String },

    /// `any` was referenced where wildcards are not permitted.
    #[error("waypoint expression `{expr}` uses `any`, which is only allowed in patterns")]
    WildcardNotAllowed { expr: String },

    /// A name that is neither a board binding nor a comprehension variable.
    #[error("waypoint expression `{expr}` references unknown name `{name}`")]
    UnknownName { expr: String, name: String },

    /// An operator was applied to values it does not support.
    #[error("type error in waypoint expression `{expr}`: {message}")]
    Type { expr: String, message: String },

    /// Division or modulo by zero, or a result that is not a number.
    #[error("arithmetic error in waypoint expression `{expr}`: {message}")]
    Arithmetic { expr: String, message: String },

    /// `range` asked for more items than the evaluator allows.
    #[error("waypoint expression `{expr}` builds a range of {len} items (limit {limit})")]
    RangeTooLarge {
        expr: String,
        len: usize,
        limit: usize,
    },

    /// Evaluation built more values in total than the evaluator allows.
    #[error("waypoint expression `{expr}` builds more than {limit} values")]
    TooManyValues { expr: String, limit: usize },
}

impl ExpressionError {
    /// Returns the expression text the error refers to.
    pub fn expr(&self) -> &str {
        use ExpressionError::*;
        match self {
            Syntax { expr, .. }
            | Shape { expr, .. }
            | WildcardNotAllowed { expr }
            | UnknownName { expr, .. }
            | Type { expr, .. }
            | Arithmetic { expr, .. }
            | RangeTooLarge { expr, .. }
            | TooManyValues { expr, .. } => expr,
        }
    }

    /// True for the errors that mean "bad binding" rather than "bad shape/syntax".
    pub fn is_binding_error(&self) -> bool {
        matches!(
            self,
            ExpressionError::WildcardNotAllowed { .. } | ExpressionError::UnknownName { .. }
        )
    }
}

impl GameError for ExpressionError {
    fn severity(&self) -> ErrorSeverity {
        // All of these are content-authoring bugs.
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use ExpressionError::*;
        match self {
            Syntax { .. } => "EXPR_SYNTAX",
            Shape { .. } => "EXPR_SHAPE",
            WildcardNotAllowed { .. } => "EXPR_WILDCARD_NOT_ALLOWED",
            UnknownName { .. } => "EXPR_UNKNOWN_NAME",
            Type { .. } => "EXPR_TYPE",
            Arithmetic { .. } => "EXPR_ARITHMETIC",
            RangeTooLarge { .. } => "EXPR_RANGE_TOO_LARGE",
            TooManyValues { .. } => "EXPR_TOO_MANY_VALUES",
        }
    }
}
