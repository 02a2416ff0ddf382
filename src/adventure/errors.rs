use thiserror::Error;

/// Errors that can arise while building, loading or persisting a game.
///
/// Command-level problems (unknown verbs, missing arguments, weight limits,
/// rejected solutions) are not errors: the controller reports them as text.
#[derive(Debug, Error)]
pub enum AdventureError {
    /// Wrapper around IO errors (missing world file, unwritable save slot, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around JSON parse and encode errors.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Returned when an item is built with impossible use counts.
    #[error("invalid item '{name}': {reason}")]
    InvalidItem { name: String, reason: String },

    /// A room, fixture or player refers to an entity the world does not define.
    #[error("unknown {kind} '{name}'")]
    UnknownReference { kind: &'static str, name: String },

    /// A field held a value that could not be interpreted.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Returned when fetching something that is not present.
    #[error("not found: {0}")]
    NotFound(String),
}
