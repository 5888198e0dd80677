use thiserror::Error;

/// Errors raised while building, checking or emitting a claim input.
#[derive(Debug, Error)]
pub enum InputError {
    /// Writing the rendered record failed.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Serializer produced bytes that are not UTF-8.
    #[error("rendered json is not utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// `num_claims` outside `1..=max_claims`.
    #[error("num_claims must be in 1..={max_claims}, got {num_claims}")]
    ClaimCount { num_claims: u64, max_claims: usize },

    /// A per-slot array does not have one entry per circuit slot.
    #[error("{field} has {found} entries, expected {expected}")]
    SlotCount {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    /// Live claim ids must be strictly increasing.
    #[error("claim {index} is not greater than claim {}", .index - 1)]
    Unordered { index: usize },
}

pub type Result<T> = std::result::Result<T, InputError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_failure_is_not_reported_as_write_failure() {
        let err: InputError = String::from_utf8(vec![0xff]).unwrap_err().into();
        assert!(matches!(err, InputError::Utf8(_)));
        assert!(err.to_string().starts_with("rendered json is not utf-8:"));
    }
}
