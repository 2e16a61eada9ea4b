use std::sync::Arc;

use cherts_core::action::waypoint::{MAX_EVAL_ITEMS, MAX_RANGE_LEN};
use cherts_core::{
    Board, ConfigError, ExpressionError, Frame, Heading, MoveMode, MoveType, Piece, PieceId,
    PieceType, PlayerSide, Vector, eval_waypoint_expr,
};

fn bare_piece_type() -> Arc<PieceType> {
    Arc::new(PieceType::new("token", 0.5, Vec::new(), Vec::new(), 0.0).unwrap())
}

fn piece_at(frame: Frame, xyw: Vector) -> Piece {
    Piece::new(PieceId::new(PlayerSide::One, 0), frame, bare_piece_type(), xyw)
}

fn board() -> Board {
    Board::new(8, 8).unwrap()
}

#[test]
fn single_coordinate_becomes_one_single_waypoint_path() {
    let piece = piece_at(Frame::WORLD, Vector::new(2.0, 2.0));
    let paths = eval_waypoint_expr("(x, y+1)", &piece, &board(), false).unwrap();
    assert_eq!(paths, vec![vec![Vector::new(2.0, 3.0)]]);
}

#[test]
fn coordinate_list_is_one_path_in_order() {
    let piece = piece_at(Frame::WORLD, Vector::new(2.0, 2.0));
    let paths = eval_waypoint_expr("[(x,y+1),(x,y+2)]", &piece, &board(), false).unwrap();
    assert_eq!(paths, vec![vec![Vector::new(2.0, 3.0), Vector::new(2.0, 4.0)]]);
}

#[test]
fn list_of_lists_is_several_paths() {
    let piece = piece_at(Frame::WORLD, Vector::new(0.0, 0.0));
    let paths =
        eval_waypoint_expr("[[(x+1, y+2)], [(x+2, y+1)]]", &piece, &board(), false).unwrap();
    assert_eq!(
        paths,
        vec![vec![Vector::new(1.0, 2.0)], vec![Vector::new(2.0, 1.0)]]
    );
}

#[test]
fn comprehension_builds_a_ray() {
    let piece = piece_at(Frame::WORLD, Vector::new(0.0, 0.0));
    let paths =
        eval_waypoint_expr("[(x + i, y + i) for i in range(1, 4)]", &piece, &board(), false)
            .unwrap();
    assert_eq!(
        paths,
        vec![vec![
            Vector::new(1.0, 1.0),
            Vector::new(2.0, 2.0),
            Vector::new(3.0, 3.0),
        ]]
    );
}

#[test]
fn player_two_offsets_are_mirrored_into_the_world() {
    let frame = Frame::new(Vector::new(7.0, 7.0), Heading::REVERSED);
    // Player frame (2, 2) is world (5, 5).
    let piece = piece_at(frame, Vector::new(5.0, 5.0));
    let paths = eval_waypoint_expr("(x, y+1)", &piece, &board(), false).unwrap();
    assert_eq!(paths, vec![vec![Vector::new(5.0, 4.0)]]);
}

#[test]
fn empty_list_is_a_shape_error() {
    let piece = piece_at(Frame::WORLD, Vector::ZERO);
    let err = eval_waypoint_expr("[]", &piece, &board(), false).unwrap_err();
    assert!(matches!(err, ExpressionError::Shape { .. }), "{err:?}");
}

#[test]
fn list_containing_an_empty_path_is_a_shape_error() {
    let piece = piece_at(Frame::WORLD, Vector::ZERO);
    let err = eval_waypoint_expr("[[(x, y)], []]", &piece, &board(), false).unwrap_err();
    assert!(matches!(err, ExpressionError::Shape { .. }), "{err:?}");
}

#[test]
fn scalar_result_is_a_shape_error() {
    let piece = piece_at(Frame::WORLD, Vector::ZERO);
    let err = eval_waypoint_expr("x + y", &piece, &board(), false).unwrap_err();
    assert!(matches!(err, ExpressionError::Shape { .. }), "{err:?}");
    assert_eq!(err.expr(), "x + y");
}

#[test]
fn wildcard_outside_patterns_is_a_binding_error() {
    let piece = piece_at(Frame::WORLD, Vector::ZERO);
    let err = eval_waypoint_expr("(any, h - 1)", &piece, &board(), false).unwrap_err();
    assert!(matches!(err, ExpressionError::WildcardNotAllowed { .. }));
    assert!(err.is_binding_error());
}

#[test]
fn wildcard_in_patterns_stays_nan_in_the_world() {
    let frame = Frame::new(Vector::new(7.0, 7.0), Heading::REVERSED);
    let piece = piece_at(frame, Vector::new(7.0, 6.0));
    let paths = eval_waypoint_expr("(any, h - 1)", &piece, &board(), true).unwrap();

    assert_eq!(paths.len(), 1);
    let target = paths[0][0];
    assert!(target.x.is_nan());
    assert_eq!(target.y, 0.0);
}

#[test]
fn unknown_names_are_binding_errors() {
    let piece = piece_at(Frame::WORLD, Vector::ZERO);
    let err = eval_waypoint_expr("(x, z)", &piece, &board(), false).unwrap_err();
    assert_eq!(
        err,
        ExpressionError::UnknownName {
            expr: "(x, z)".into(),
            name: "z".into(),
        }
    );
    assert!(err.is_binding_error());
}

#[test]
fn general_purpose_code_is_rejected() {
    let piece = piece_at(Frame::WORLD, Vector::ZERO);
    for source in ["__import__('os')", "open('x')", "(x, y); (x, y)", "lambda: 1"] {
        let err = eval_waypoint_expr(source, &piece, &board(), false).unwrap_err();
        assert!(
            matches!(
                err,
                ExpressionError::Syntax { .. } | ExpressionError::UnknownName { .. }
            ),
            "{source}: {err:?}"
        );
    }
}

#[test]
fn oversized_ranges_are_refused() {
    let piece = piece_at(Frame::WORLD, Vector::ZERO);
    let source = format!("[(x, i) for i in range({})]", MAX_RANGE_LEN + 1);
    let err = eval_waypoint_expr(&source, &piece, &board(), false).unwrap_err();
    assert!(matches!(err, ExpressionError::RangeTooLarge { .. }), "{err:?}");
}

#[test]
fn deeply_nested_content_is_a_config_error() {
    let source = format!("{}(x, y){}", "(".repeat(3000), ")".repeat(3000));
    let err = MoveType::new("tower", MoveMode::Jump, [source]).unwrap_err();
    assert!(
        matches!(
            err,
            ConfigError::InvalidExpression {
                ref owner,
                error: ExpressionError::Syntax { .. },
            } if owner == "tower"
        ),
        "{err:?}"
    );
}

#[test]
fn nested_comprehensions_share_one_budget() {
    let piece = piece_at(Frame::WORLD, Vector::ZERO);
    let err = eval_waypoint_expr(
        "[(i, j) for i in range(4096) for j in range(1024)]",
        &piece,
        &board(),
        false,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ExpressionError::TooManyValues {
            expr: "[(i, j) for i in range(4096) for j in range(1024)]".into(),
            limit: MAX_EVAL_ITEMS,
        }
    );
}

#[test]
fn moves_never_gain_wildcards_from_arithmetic() {
    let piece = piece_at(Frame::WORLD, Vector::new(2.0, 2.0));
    for source in ["(x, (-1) ** 0.5)", "(x, 10 ** 400 - 10 ** 400)"] {
        let err = eval_waypoint_expr(source, &piece, &board(), false).unwrap_err();
        assert!(matches!(err, ExpressionError::Arithmetic { .. }), "{source}: {err:?}");
    }
}
