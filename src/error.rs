//! Error types for the desert engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DesertError {
    /// An action was submitted that is not in the current legal set.
    /// The legal-action list is the single source of truth for
    /// legality, so this is a caller bug, not a recoverable game
    /// condition. Resource floors/ceilings clamp silently and deck
    /// exhaustion is a quiet no-draw; neither surfaces here.
    #[error("Illegal action: {0}")]
    IllegalAction(String),
}

pub type Result<T> = std::result::Result<T, DesertError>;
