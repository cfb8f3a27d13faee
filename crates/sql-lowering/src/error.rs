//! Error types for sql-lowering

use thiserror::Error;

use crate::dialects::DialectType;

/// The result type for lowering operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while lowering a parse tree into the AST
#[derive(Debug, Error)]
pub enum Error {
    /// A tree shape or keyword reached a factory that its dialect mapping does not cover.
    ///
    /// The upstream grammar has already accepted the input, so this always points at a gap
    /// between grammar and factory rather than at bad user SQL.
    #[error("Unrecognized {rule} in {dialect}: {detail}")]
    Unrecognized {
        dialect: DialectType,
        rule: &'static str,
        detail: String,
    },

    /// A combination the grammar lets through but the dialect rejects
    #[error("Illegal combination in {dialect}: {message}")]
    IllegalCombination {
        dialect: DialectType,
        message: String,
    },

    /// A dialect name that does not match any supported dialect
    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    /// Error while serializing or deserializing an AST
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error (should not happen in normal usage)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an unrecognized-shape error
    pub fn unrecognized(
        dialect: DialectType,
        rule: &'static str,
        detail: impl Into<String>,
    ) -> Self {
        Error::Unrecognized {
            dialect,
            rule,
            detail: detail.into(),
        }
    }

    /// Create an illegal-combination error
    pub fn illegal(dialect: DialectType, message: impl Into<String>) -> Self {
        Error::IllegalCombination {
            dialect,
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal(message.into())
    }

    /// The dialect whose factory raised this error, if any
    pub fn dialect(&self) -> Option<DialectType> {
        match self {
            Error::Unrecognized { dialect, .. } | Error::IllegalCombination { dialect, .. } => {
                Some(*dialect)
            }
            Error::UnknownDialect(_) | Error::Serialization(_) | Error::Internal(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_unrecognized_message_names_rule_and_dialect() {
        let err = Error::unrecognized(DialectType::Oracle, "comparison operator", "=>=");
        assert_eq!(
            err.to_string(),
            "Unrecognized comparison operator in oracle: =>="
        );
        assert_eq!(err.dialect(), Some(DialectType::Oracle));
    }

    #[test]
    fn test_illegal_combination_message() {
        let err = Error::illegal(DialectType::Oracle, "USING INDEX with GLOBAL");
        assert!(matches!(err, Error::IllegalCombination { .. }));
        assert!(err.to_string().contains("USING INDEX with GLOBAL"));
    }

    #[test]
    fn test_internal_has_no_dialect() {
        assert_eq!(Error::internal("boom").dialect(), None);
    }

    /// Counts records emitted from this module only; factory tests log concurrently.
    struct ErrorModuleLogger(AtomicUsize);

    impl log::Log for ErrorModuleLogger {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            if record.target().starts_with(module_path!().trim_end_matches("::tests")) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: ErrorModuleLogger = ErrorModuleLogger(AtomicUsize::new(0));

    #[test]
    fn test_constructors_do_not_log() {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Trace);

        let _ = Error::unrecognized(DialectType::MySQL, "binary operator", "===");
        let _ = Error::illegal(DialectType::Oracle, "NATURAL JOIN with ON");
        assert_eq!(LOGGER.0.load(Ordering::SeqCst), 0);
    }
}
