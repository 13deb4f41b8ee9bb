use thiserror::Error;

/// Failures surfaced by the sand core.
///
/// Everything here is local and cosmetic: callers log and carry on with the
/// affected subsystem disabled rather than tearing down the surface.
#[derive(Debug, Error)]
pub enum SandError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("audio unavailable: {0}")]
    AudioUnavailable(String),

    #[error("audio node error: {0}")]
    AudioNode(String),
}

pub type SandResult<T> = Result<T, SandError>;
