use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkirmishError {
    #[error("target is out of range")]
    OutOfRange,

    #[error("target tile is occupied")]
    TileOccupied,

    #[error("unit has already taken that action this phase")]
    AlreadyActed,

    #[error("action names a unit other than the one acting")]
    UnitMismatch,

    #[error("target not found: {0}")]
    TargetNotFound(String),

    #[error("malformed action: {0}")]
    MalformedAction(String),

    #[error("inference protocol error: {0}")]
    ProtocolError(String),

    #[error("response parse failure: {0}")]
    ParseFailure(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SkirmishError>;
