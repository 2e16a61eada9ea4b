//! Preview the moves every piece could make at the start of a match
//!
//! Loads match content, sets up both players and evaluates each piece's move
//! types (and optionally pattern types) in the world frame.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use serde::Serialize;
use std::path::PathBuf;

use cherts_core::{Board, Move, Pattern, PermitAll, Piece, PlayerSide, Vector, World};

/// Set up a match and print every piece's possible moves
#[derive(Parser)]
pub struct Preview {
    /// Directory containing config.toml (defaults to the embedded match)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,

    /// Also list pattern types
    #[arg(short, long)]
    patterns: bool,

    /// Only show pieces owned by this side
    #[arg(short, long, value_enum)]
    side: Option<SideArg>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One line per move, grouped by piece
    Summary,
    /// Full JSON output
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum SideArg {
    One,
    Two,
}

impl From<SideArg> for PlayerSide {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::One => PlayerSide::One,
            SideArg::Two => PlayerSide::Two,
        }
    }
}

#[derive(Serialize)]
struct MatchPreview {
    width: u32,
    height: u32,
    pieces: Vec<PiecePreview>,
}

#[derive(Serialize)]
struct PiecePreview {
    id: String,
    owner: String,
    piece_type: String,
    position: [f64; 2],
    moves: Vec<MovePreview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    patterns: Option<Vec<PatternPreview>>,
}

#[derive(Serialize)]
struct MovePreview {
    move_type: String,
    mode: String,
    on_board: bool,
    path: Vec<[f64; 2]>,
}

/// Wildcard components serialize as `null`.
#[derive(Serialize)]
struct PatternPreview {
    pattern_type: String,
    must_complete: bool,
    on_complete: Vec<String>,
    path: Vec<[Option<f64>; 2]>,
}

impl Preview {
    pub fn execute(self) -> Result<()> {
        let config = super::load_config(self.data_dir.as_deref())?;
        let world = World::setup(&config).context("Failed to set up match")?;
        let side = self.side.map(PlayerSide::from);

        let pieces = world
            .pieces()
            .filter(|piece| side.is_none_or(|side| piece.owner() == side))
            .map(|piece| preview_piece(&world, piece, self.patterns))
            .collect::<Result<Vec<_>>>()?;

        let preview = MatchPreview {
            width: world.board().width(),
            height: world.board().height(),
            pieces,
        };

        match self.format {
            OutputFormat::Summary => print_summary(&preview),
            OutputFormat::Json => print_json(&preview)?,
        }

        Ok(())
    }
}

fn preview_piece(world: &World, piece: &Piece, with_patterns: bool) -> Result<PiecePreview> {
    let board = world.board();
    let moves = piece
        .find_legal_moves(board, &PermitAll)
        .with_context(|| format!("Failed to generate moves for {}", piece.id()))?;

    let patterns = if with_patterns {
        let patterns = piece
            .find_possible_patterns(board)
            .with_context(|| format!("Failed to generate patterns for {}", piece.id()))?;
        Some(patterns.iter().map(preview_pattern).collect())
    } else {
        None
    };

    Ok(PiecePreview {
        id: piece.id().to_string(),
        owner: piece.owner().to_string(),
        piece_type: piece.piece_type().name().to_string(),
        position: piece.position().to_array(),
        moves: moves.iter().map(|m| preview_move(board, m)).collect(),
        patterns,
    })
}

fn preview_move(board: &Board, candidate: &Move) -> MovePreview {
    MovePreview {
        move_type: candidate.move_type().name().to_string(),
        mode: candidate.mode().to_string(),
        on_board: candidate
            .waypoint_path()
            .iter()
            .all(|xyw| board.contains(*xyw)),
        path: candidate
            .waypoint_path()
            .iter()
            .map(|xyw| xyw.to_array())
            .collect(),
    }
}

fn preview_pattern(pattern: &Pattern) -> PatternPreview {
    let component = |value: f64| (!value.is_nan()).then_some(value);
    PatternPreview {
        pattern_type: pattern.pattern_type().name().to_string(),
        must_complete: pattern.is_captive(),
        on_complete: pattern.pattern_type().on_complete_exprs().to_vec(),
        path: pattern
            .waypoint_path()
            .iter()
            .map(|xyw| [component(xyw.x), component(xyw.y)])
            .collect(),
    }
}

fn print_summary(preview: &MatchPreview) {
    println!("{}", style("=== Match Preview ===").bold().green());
    println!("  Board: {}x{}", preview.width, preview.height);
    println!("  Pieces: {}", preview.pieces.len());
    println!();

    for piece in &preview.pieces {
        println!(
            "{} {} at {}",
            style(&piece.id).bold().cyan(),
            style(&piece.piece_type).yellow(),
            format_point(piece.position)
        );

        for candidate in &piece.moves {
            let path = candidate
                .path
                .iter()
                .copied()
                .map(format_point)
                .collect::<Vec<_>>()
                .join(" -> ");
            let marker = if candidate.on_board {
                style("on board").green()
            } else {
                style("leaves board").dim()
            };
            println!(
                "  {:<16} {:<5} {} [{}]",
                candidate.move_type, candidate.mode, path, marker
            );
        }

        for pattern in piece.patterns.iter().flatten() {
            let path = pattern
                .path
                .iter()
                .copied()
                .map(|point| point.map(|v| v.unwrap_or(f64::NAN)))
                .map(format_point)
                .collect::<Vec<_>>()
                .join(" -> ");
            let captive = if pattern.must_complete { " (must complete)" } else { "" };
            println!(
                "  {} {} {}{}",
                style("pattern").magenta(),
                pattern.pattern_type,
                path,
                captive
            );
        }
        println!();
    }
}

fn print_json(preview: &MatchPreview) -> Result<()> {
    let json =
        serde_json::to_string_pretty(preview).context("Failed to serialize preview to JSON")?;
    println!("{}", json);
    Ok(())
}

/// Renders a point the way the core prints vectors; NaN reads as `any`.
fn format_point(point: [f64; 2]) -> String {
    Vector::from(point).to_string()
}
