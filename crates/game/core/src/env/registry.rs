use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::{MatchConfig, MoveTypeParams, PatternTypeParams, PieceTypeParams};

use super::{ConfigError, MoveType, PatternType, PieceType};

/// Name-keyed registry of the shared move, pattern and piece types of a match.
///
/// Built once at session setup. Lookups hand out `Arc` clones, so pieces hold
/// a handle to the one shared descriptor rather than a copy.
#[derive(Clone, Debug, Default)]
pub struct ContentRegistry {
    move_types: BTreeMap<String, Arc<MoveType>>,
    pattern_types: BTreeMap<String, Arc<PatternType>>,
    piece_types: BTreeMap<String, Arc<PieceType>>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds every type described by `config`.
    ///
    /// Move and pattern types are built first so piece types can resolve them
    /// by name. Any dangling reference or unparseable expression fails the
    /// whole build.
    pub fn from_config(config: &MatchConfig) -> Result<Self, ConfigError> {
        let mut registry = Self::new();

        for (name, params) in &config.moves {
            registry.register_move_params(name, params)?;
        }
        for (name, params) in &config.patterns {
            registry.register_pattern_params(name, params)?;
        }
        for (name, params) in &config.pieces {
            registry.register_piece_params(name, params)?;
        }

        tracing::debug!(
            move_types = registry.move_types.len(),
            pattern_types = registry.pattern_types.len(),
            piece_types = registry.piece_types.len(),
            "content registry built"
        );
        Ok(registry)
    }

    pub fn register_move_params(
        &mut self,
        name: &str,
        params: &MoveTypeParams,
    ) -> Result<Arc<MoveType>, ConfigError> {
        Ok(self.register_move_type(MoveType::from_params(name, params)?))
    }

    pub fn register_pattern_params(
        &mut self,
        name: &str,
        params: &PatternTypeParams,
    ) -> Result<Arc<PatternType>, ConfigError> {
        Ok(self.register_pattern_type(PatternType::from_params(name, params)?))
    }

    /// Resolves the named move/pattern types and registers the piece type.
    pub fn register_piece_params(
        &mut self,
        name: &str,
        params: &PieceTypeParams,
    ) -> Result<Arc<PieceType>, ConfigError> {
        let move_types = params
            .moves
            .iter()
            .map(|move_name| {
                self.move_type(move_name)
                    .cloned()
                    .ok_or_else(|| ConfigError::UnknownMoveType {
                        piece: name.to_string(),
                        name: move_name.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let pattern_types = params
            .patterns
            .iter()
            .map(|pattern_name| {
                self.pattern_type(pattern_name)
                    .cloned()
                    .ok_or_else(|| ConfigError::UnknownPatternType {
                        piece: name.to_string(),
                        name: pattern_name.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let piece_type = PieceType::new(
            name,
            params.radius,
            move_types,
            pattern_types,
            params.cooldown_sec,
        )?;
        Ok(self.register_piece_type(piece_type))
    }

    /// Adds a move type, replacing any previous one with the same name.
    pub fn register_move_type(&mut self, move_type: MoveType) -> Arc<MoveType> {
        let shared = Arc::new(move_type);
        self.move_types
            .insert(shared.name().to_string(), Arc::clone(&shared));
        shared
    }

    pub fn register_pattern_type(&mut self, pattern_type: PatternType) -> Arc<PatternType> {
        let shared = Arc::new(pattern_type);
        self.pattern_types
            .insert(shared.name().to_string(), Arc::clone(&shared));
        shared
    }

    pub fn register_piece_type(&mut self, piece_type: PieceType) -> Arc<PieceType> {
        let shared = Arc::new(piece_type);
        self.piece_types
            .insert(shared.name().to_string(), Arc::clone(&shared));
        shared
    }

    pub fn move_type(&self, name: &str) -> Option<&Arc<MoveType>> {
        self.move_types.get(name)
    }

    pub fn pattern_type(&self, name: &str) -> Option<&Arc<PatternType>> {
        self.pattern_types.get(name)
    }

    pub fn piece_type(&self, name: &str) -> Option<&Arc<PieceType>> {
        self.piece_types.get(name)
    }

    /// Like [`Self::piece_type`], but a missing name is a configuration error.
    pub fn require_piece_type(&self, name: &str) -> Result<Arc<PieceType>, ConfigError> {
        self.piece_type(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownPieceType {
                name: name.to_string(),
            })
    }

    pub fn move_types(&self) -> impl Iterator<Item = &Arc<MoveType>> {
        self.move_types.values()
    }

    pub fn pattern_types(&self) -> impl Iterator<Item = &Arc<PatternType>> {
        self.pattern_types.values()
    }

    pub fn piece_types(&self) -> impl Iterator<Item = &Arc<PieceType>> {
        self.piece_types.values()
    }
}
