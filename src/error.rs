/// Snowflake error type.
#[derive(Debug, thiserror::Error)]
pub enum FlakeError {
    /// Node id exceeds the maximum encodable value.
    #[error("node id exceeds maximum value: {0} > {1}")]
    NodeIdExceedsMax(u64, u64),

    /// Host identity could not be resolved.
    #[error("failed to resolve host identity")]
    HostLookup(#[source] std::io::Error),

    /// Textual ID is not a valid decimal/radix integer.
    #[error("invalid snowflake text")]
    ParseInt(#[from] std::num::ParseIntError),

    /// Base64 form could not be decoded.
    #[error("invalid base64 snowflake text")]
    Base64(#[from] base64::DecodeError),

    /// Decoded bytes do not form a valid UTF-8 decimal string.
    #[error("decoded snowflake bytes are not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Snowflake result type.
pub type FlakeResult<T> = Result<T, FlakeError>;
