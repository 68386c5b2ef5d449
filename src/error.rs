/// Failures that stop a session from starting or shutting down cleanly.
///
/// Losing the game is not an error; see `compute::TickOutcome`.

use std::path::PathBuf;

use crate::config::ConfigError;

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Malformed high score in {}: {source}", path.display())]
    HighScore {
        path: PathBuf,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("No music files in {}", .0.display())]
    EmptyMusicDir(PathBuf),
}
