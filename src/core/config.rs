//! Match configuration.
//!
//! The lobby collects seated players and hands the finished roster to
//! `GameEngine::new`. Validation happens at engine construction: a bad
//! roster rejects match creation and never becomes a play-time error.

use serde::{Deserialize, Serialize};

/// Fewest seats a match supports.
pub const MIN_PLAYERS: usize = 2;

/// Most seats a match supports (Chancellor edition box limit).
pub const MAX_PLAYERS: usize = 6;

/// Points needed to win when the lobby does not choose.
pub const DEFAULT_POINTS_TO_WIN: u32 = 3;

/// Match setup: roster and win condition.
///
/// ## Example
///
/// ```
/// use billet_doux::core::GameConfig;
///
/// let config = GameConfig::new("friday-night")
///     .with_players(["Ada", "Bela", "Cleo"])
///     .with_points_to_win(4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Match label, carried into snapshots and logs.
    pub name: String,

    /// Display names in seat order.
    pub player_names: Vec<String>,

    /// Seats this match was created for.
    pub max_players: u8,

    /// Points a player needs to win the match.
    pub points_to_win: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            player_names: Vec::new(),
            max_players: 4,
            points_to_win: DEFAULT_POINTS_TO_WIN,
        }
    }
}

impl GameConfig {
    /// Create a configuration with the default seat limit and win target.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Seat one player (builder pattern).
    #[must_use]
    pub fn with_player(mut self, name: impl Into<String>) -> Self {
        self.player_names.push(name.into());
        self
    }

    /// Seat several players in order.
    #[must_use]
    pub fn with_players<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.player_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Set the seat limit.
    #[must_use]
    pub fn with_max_players(mut self, max: u8) -> Self {
        self.max_players = max;
        self
    }

    /// Set the win target.
    #[must_use]
    pub fn with_points_to_win(mut self, points: u32) -> Self {
        self.points_to_win = points;
        self
    }

    /// Number of seated players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_names.len()
    }

    /// Check the roster against the seat and win-target bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limit = self.max_players as usize;
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&limit) {
            return Err(ConfigError::SeatLimit { got: self.max_players });
        }

        let seated = self.player_names.len();
        if seated < MIN_PLAYERS || seated > limit {
            return Err(ConfigError::PlayerCount {
                got: seated,
                min: MIN_PLAYERS,
                max: limit,
            });
        }

        if self.points_to_win == 0 {
            return Err(ConfigError::ZeroPointsToWin);
        }

        Ok(())
    }
}

/// A rejected match setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Seated player count outside the playable range.
    #[error("a match needs {min}-{max} seated players, got {got}")]
    PlayerCount { got: usize, min: usize, max: usize },

    /// Seat limit itself outside what the edition supports.
    #[error("seat limit {got} outside the supported range 2-6")]
    SeatLimit { got: u8 },

    /// A win target of zero would end the match before it starts.
    #[error("points to win must be at least 1")]
    ZeroPointsToWin,
}
