use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Malformed or missing algorithm name or descriptor field.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// Wrong buffer length, bad padding, failed integrity check or an
    /// out-of-range value.
    #[error("data error: {0}")]
    Data(String),

    /// Unknown combination, or an operation this variant does not offer.
    #[error("not supported: {0}")]
    NotSupported(String),

    #[error("operation failed: {0}")]
    Operation(String),
}

impl Error {
    pub fn syntax(msg: impl Into<String>) -> Self {
        Self::Syntax(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn not_supported(msg: impl Into<String>) -> Self {
        Self::NotSupported(msg.into())
    }

    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    /// Short name of the error kind, as reported across API boundaries.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Syntax(_) => "SyntaxError",
            Self::Data(_) => "DataError",
            Self::NotSupported(_) => "NotSupportedError",
            Self::Operation(_) => "OperationError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_kind_and_message() {
        let err = Error::data("invalid key length 31");
        assert_eq!(err.to_string(), "data error: invalid key length 31");
        assert_eq!(err.kind(), "DataError");
    }

    #[test]
    fn error_is_send_sync() {
        fn check<T: Send + Sync + 'static>() {}
        check::<Error>();
    }

    #[test]
    fn kinds_are_distinct() {
        let kinds = [
            Error::syntax("a").kind(),
            Error::data("a").kind(),
            Error::not_supported("a").kind(),
            Error::operation("a").kind(),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
