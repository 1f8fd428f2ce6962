use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding.
#[derive(Debug, thiserror::Error)]
pub enum BmpError {
    /// The source bytes could not be read.
    #[cfg(feature = "std")]
    #[error("failed to read BMP source: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a BMP image: {0}")]
    InvalidFormat(String),

    #[error("unsupported BMP variant: {0}")]
    UnsupportedFormat(String),

    /// Declared sizes point past the end of the buffer.
    #[error("truncated BMP input: need {needed} bytes at offset {offset}, only {available} available")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

/// Fieldless view of [`BmpError`], for callers that only branch on the kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Io,
    InvalidFormat,
    UnsupportedFormat,
    TruncatedInput,
    LimitExceeded,
    Cancelled,
}

impl BmpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            #[cfg(feature = "std")]
            Self::Io(_) => ErrorKind::Io,
            Self::InvalidFormat(_) => ErrorKind::InvalidFormat,
            Self::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Self::TruncatedInput { .. } => ErrorKind::TruncatedInput,
            Self::DimensionsTooLarge { .. } | Self::LimitExceeded(_) => ErrorKind::LimitExceeded,
            Self::Cancelled(_) => ErrorKind::Cancelled,
        }
    }

    /// Shorthand for a failed bounds check on `data`.
    pub(crate) fn truncated(offset: usize, needed: usize, data_len: usize) -> Self {
        Self::TruncatedInput {
            offset,
            needed,
            available: data_len.saturating_sub(offset),
        }
    }
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}
