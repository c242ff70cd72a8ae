/// Crate-wide result alias.
pub type GlintResult<T> = Result<T, GlintError>;

/// Failure classes of the page engine.
///
/// `Validation` covers broken static invariants caught before mount;
/// `Animation` covers malformed keyframe tracks; `Evaluation` covers events
/// or samples referencing state that does not exist. JSON errors from the
/// page boundary convert via `From`.
#[derive(thiserror::Error, Debug)]
pub enum GlintError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("animation error: {0}")]
    Animation(String),

    #[error("evaluation error: {0}")]
    Evaluation(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlintError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_variants_keep_their_prefixes() {
        let cases = [
            (GlintError::validation("bad band"), "validation error: bad band"),
            (GlintError::animation("bad keys"), "animation error: bad keys"),
            (GlintError::evaluation("bad id"), "evaluation error: bad id"),
        ];
        for (err, display) in cases {
            assert_eq!(err.to_string(), display);
        }
    }

    #[test]
    fn json_errors_convert_and_keep_the_prefix() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = GlintError::from(parse);
        assert!(matches!(err, GlintError::Serde(_)));
        assert!(err.to_string().starts_with("serialization error:"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = GlintError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
