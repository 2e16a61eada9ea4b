//! Validate match content
//!
//! Builds the content registry and the opening position, then evaluates every
//! piece's waypoint expressions once so authoring errors surface before a
//! match is played.

use anyhow::Result;
use clap::Parser;
use console::style;
use std::path::PathBuf;

use cherts_core::{ContentRegistry, GameError, World};

/// Validate match content without printing moves
#[derive(Parser)]
pub struct Check {
    /// Directory containing config.toml (defaults to the embedded match)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl Check {
    pub fn execute(self) -> Result<()> {
        let config = super::load_config(self.data_dir.as_deref())?;

        let registry = ContentRegistry::from_config(&config).map_err(report)?;
        println!(
            "{} {} move types, {} pattern types, {} piece types",
            style("Content:").bold().cyan(),
            registry.move_types().count(),
            registry.pattern_types().count(),
            registry.piece_types().count()
        );

        let world = World::setup(&config).map_err(report)?;
        let mut moves = 0;
        let mut patterns = 0;
        for piece in world.pieces() {
            moves += piece.find_possible_moves(world.board()).map_err(report)?.len();
            patterns += piece
                .find_possible_patterns(world.board())
                .map_err(report)?
                .len();
        }

        println!(
            "{} {} pieces, {} moves, {} patterns",
            style("Opening:").bold().cyan(),
            world.pieces().count(),
            moves,
            patterns
        );
        println!("{}", style("Content OK").bold().green());
        Ok(())
    }
}

/// Prints the error classification and hands the error on to anyhow.
fn report<E>(error: E) -> anyhow::Error
where
    E: GameError + std::error::Error + Send + Sync + 'static,
{
    let severity = error.severity();
    let label = if severity.is_fatal() {
        style(severity.as_str()).bold().red()
    } else {
        style(severity.as_str()).yellow()
    };
    eprintln!(
        "{} [{}] {}",
        style("error").bold().red(),
        label,
        error.error_code()
    );
    anyhow::Error::new(error)
}
