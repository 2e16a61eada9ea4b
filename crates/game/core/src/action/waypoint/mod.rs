//! Waypoint expressions: the small language move and pattern types use to
//! describe where a piece may travel.
//!
//! Expressions are written once, in the moving player's frame, and see only
//! these bindings:
//! - `x`, `y`: the piece position in its own player frame
//! - `w`, `h`: board width and height
//! - `any`: the wildcard (NaN), only when evaluating pattern expressions
//!
//! A result must be a coordinate, a non-empty list of coordinates (one path),
//! or a non-empty list of non-empty lists of coordinates (several paths).
//! Every coordinate is converted to the world frame before it is returned.
//!
//! ## Examples
//!
//! ```text
//! (x, y + 1)                                   one step forward
//! [(x, y + 1), (x, y + 2)]                     two-step slide
//! [[(x + i, y + i)] for i in range(1, w)]      every diagonal target as its own path
//! [(x, y + i) for i in range(1, h - y)]        one path up the file
//! ```

pub mod error;
pub mod evaluate;
mod lexer;
mod parser;
mod value;

use std::fmt;
use std::str::FromStr;

pub use error::ExpressionError;
pub use evaluate::{Bindings, MAX_EVAL_ITEMS, MAX_RANGE_LEN};
pub use parser::MAX_NESTING;

use crate::state::{Board, Frame, Piece, Vector};
use parser::Expr;

/// Ordered waypoints, in the world frame once returned from evaluation.
pub type Path = Vec<Vector>;

/// A parsed waypoint expression together with its source text.
#[derive(Clone, Debug, PartialEq)]
pub struct WaypointExpr {
    source: String,
    ast: Expr,
}

impl WaypointExpr {
    pub fn parse(source: impl Into<String>) -> Result<Self, ExpressionError> {
        let source = source.into();
        let ast = parser::parse(&source)?;
        Ok(Self { source, ast })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluates to paths in the player frame described by `bindings`.
    pub fn eval_relative(&self, bindings: &Bindings) -> Result<Vec<Path>, ExpressionError> {
        let value = evaluate::evaluate(&self.source, &self.ast, bindings)?;
        value.to_paths().ok_or_else(|| ExpressionError::Shape {
            expr: self.source.clone(),
            value: value.to_string(),
        })
    }

    /// Evaluates for `piece` on `board` and returns world-frame paths.
    pub fn eval(
        &self,
        piece: &Piece,
        board: &Board,
        any_ok: bool,
    ) -> Result<Vec<Path>, ExpressionError> {
        let bindings = bindings_for(piece, board, any_ok);
        let paths = self.eval_relative(&bindings)?;
        Ok(to_world(piece.frame(), paths))
    }
}

impl FromStr for WaypointExpr {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for WaypointExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Bindings seen by an expression evaluated for `piece` on `board`.
pub fn bindings_for(piece: &Piece, board: &Board, any_ok: bool) -> Bindings {
    let xyp = piece.player_position();
    Bindings {
        x: xyp.x,
        y: xyp.y,
        w: f64::from(board.width()),
        h: f64::from(board.height()),
        any_ok,
    }
}

/// Parses and evaluates a single expression for `piece` on `board`.
pub fn eval_waypoint_expr(
    expr: &str,
    piece: &Piece,
    board: &Board,
    any_ok: bool,
) -> Result<Vec<Path>, ExpressionError> {
    WaypointExpr::parse(expr)?.eval(piece, board, any_ok)
}

/// Evaluates expressions in order and concatenates their paths.
pub fn eval_waypoint_exprs<'a>(
    exprs: impl IntoIterator<Item = &'a WaypointExpr>,
    piece: &Piece,
    board: &Board,
    any_ok: bool,
) -> Result<Vec<Path>, ExpressionError> {
    let mut paths = Vec::new();
    for expr in exprs {
        paths.extend(expr.eval(piece, board, any_ok)?);
    }
    Ok(paths)
}

fn to_world(frame: Frame, paths: Vec<Path>) -> Vec<Path> {
    paths
        .into_iter()
        .map(|path| {
            path.into_iter()
                .map(|xyp| frame.world_from_player(xyp))
                .collect()
        })
        .collect()
}
