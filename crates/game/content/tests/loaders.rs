use std::fs;

use cherts_content::{ConfigLoader, ContentFactory};
use cherts_core::{
    ConfigError, ContentRegistry, MoveMode, PermitAll, PieceId, PlayerSide, Vector, World,
};

const SMALL_MATCH: &str = r#"
[board]
width = 4
height = 5

[moves.step]
mode = "jump"
waypoints = ["(x, y + 1)"]

[pieces.pawn]
radius = 0.3
moves = ["step"]

[[setup.pieces]]
name = "pawn"
pos = [1, 0]
"#;

#[test]
fn factory_reads_config_from_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), SMALL_MATCH).unwrap();

    let config = ContentFactory::new(dir.path()).load_config().unwrap();
    assert_eq!(config.board.width, 4);
    assert_eq!(config.moves["step"].mode, MoveMode::Jump);

    let world = World::setup(&config).unwrap();
    let pawn_two = world.piece(PieceId::new(PlayerSide::Two, 0)).unwrap();
    assert_eq!(pawn_two.position(), Vector::new(2.0, 4.0));
}

#[test]
fn missing_config_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = ContentFactory::new(dir.path()).load_config().unwrap_err();
    assert!(err.to_string().contains("config.toml"), "{err:#}");
}

#[test]
fn missing_config_falls_back_to_embedded_match() {
    let dir = tempfile::tempdir().unwrap();
    let config = ContentFactory::new(dir.path())
        .load_config_or_embedded()
        .unwrap();
    assert_eq!(config, ConfigLoader::embedded().unwrap());
}

#[test]
fn bad_expressions_fail_at_registry_build() {
    let text = SMALL_MATCH.replace("(x, y + 1)", "(x, y +)");
    let config = ConfigLoader::parse(&text).unwrap();
    let err = ContentRegistry::from_config(&config).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidExpression { ref owner, .. } if owner == "step"));
}

#[test]
fn embedded_match_sets_up_a_full_board() {
    let config = ConfigLoader::embedded().unwrap();
    let world = World::setup(&config).unwrap();

    assert_eq!(world.pieces().count(), 32);
    for side in [PlayerSide::One, PlayerSide::Two] {
        let player = world.player(side).unwrap();
        assert_eq!(player.pieces().len(), 16);
        assert!(
            player
                .pieces()
                .iter()
                .all(|piece| world.board().contains(piece.position()))
        );
    }

    // Player two's back rank lands on the far edge, mirrored.
    let rook_two = world.piece(PieceId::new(PlayerSide::Two, 0)).unwrap();
    assert_eq!(rook_two.piece_type().name(), "rook");
    assert_eq!(rook_two.position(), Vector::new(7.0, 7.0));
}

#[test]
fn embedded_pieces_generate_moves_everywhere() {
    let config = ConfigLoader::embedded().unwrap();
    let world = World::setup(&config).unwrap();

    for piece in world.pieces() {
        let moves = world.find_legal_moves(piece.id(), &PermitAll).unwrap().unwrap();
        assert!(!moves.is_empty(), "{} has no moves", piece.id());
        let patterns = world.find_possible_patterns(piece.id()).unwrap().unwrap();
        assert_eq!(
            patterns.len(),
            usize::from(piece.piece_type().name() == "pawn")
        );
    }
}

#[test]
fn embedded_knight_has_eight_leaps() {
    let config = ConfigLoader::embedded().unwrap();
    let world = World::setup(&config).unwrap();

    let knight = world.piece(PieceId::new(PlayerSide::One, 1)).unwrap();
    assert_eq!(knight.piece_type().name(), "knight");

    let moves = world.find_possible_moves(knight.id()).unwrap().unwrap();
    assert_eq!(moves.len(), 8);
    let on_board: Vec<Vector> = moves
        .iter()
        .filter_map(|m| m.destination())
        .filter(|xyw| world.board().contains(*xyw))
        .collect();
    assert_eq!(
        on_board,
        vec![Vector::new(0.0, 2.0), Vector::new(2.0, 2.0), Vector::new(3.0, 1.0)]
    );
}
