use std::path::PathBuf;

/// Errors that can occur while decoding a serialized agent.
///
/// All of these signal data corruption or version skew and are fatal: the
/// buffer is not partially recovered.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("unrecognized agent type tag: {0}")]
    UnknownTag(f64),

    #[error("agent buffer truncated: needed {needed} floats, found {found}")]
    Truncated { needed: usize, found: usize },

    #[error("agent buffer length {0} is not a multiple of 8 bytes")]
    MisalignedBuffer(usize),

    #[error("invalid layer size field: {0}")]
    InvalidLayerSize(f64),

    #[error("invalid payload length field: {0}")]
    InvalidLengthField(f64),
}

/// Errors that can occur in the agent roster store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("agent name {0:?} is not usable as a file name")]
    InvalidAgentName(String),

    #[error("no saved agent named {0:?}")]
    AgentNotFound(String),

    #[error("failed to decode agent blob at {path}: {source}")]
    BlobDecode {
        path: PathBuf,
        source: CodecError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors surfaced by the offload layer.
///
/// Cancellation is deliberately absent: a terminated run is a normal
/// outcome, not a failure.
#[derive(Debug, thiserror::Error)]
pub enum OffloadError {
    #[error("worker failed: {0}")]
    Worker(String),

    #[error("worker disconnected before posting a result")]
    Disconnected,
}
