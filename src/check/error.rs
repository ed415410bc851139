// src/check/error.rs

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Whether a failed check is worth repeating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transient,
    Fatal,
}

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// Server not accepting connections yet.
    #[error("database '{alias}' is unreachable: {source}")]
    Unreachable {
        alias: String,
        #[source]
        source: BoxError,
    },

    /// Server is up but the target database has not been created.
    #[error("database '{database}' for alias '{alias}' does not exist yet")]
    NotProvisioned { alias: String, database: String },

    #[error("database alias '{0}' is not configured")]
    UnknownAlias(String),

    #[error("database '{alias}' check failed: {source}")]
    Fatal {
        alias: String,
        #[source]
        source: BoxError,
    },
}

impl CheckError {
    pub fn unreachable(alias: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Unreachable {
            alias: alias.into(),
            source: source.into(),
        }
    }

    pub fn fatal(alias: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Fatal {
            alias: alias.into(),
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unreachable { .. } | Self::NotProvisioned { .. } => ErrorKind::Transient,
            Self::UnknownAlias(_) | Self::Fatal { .. } => ErrorKind::Fatal,
        }
    }

    pub fn is_transient(&self) -> bool {
        self.kind() == ErrorKind::Transient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert!(CheckError::unreachable("default", "connection refused").is_transient());
        assert!(CheckError::NotProvisioned {
            alias: "default".into(),
            database: "app".into(),
        }
        .is_transient());
        assert_eq!(
            CheckError::UnknownAlias("replica".into()).kind(),
            ErrorKind::Fatal
        );
        assert_eq!(
            CheckError::fatal("default", "password authentication failed").kind(),
            ErrorKind::Fatal
        );
    }

    #[test]
    fn test_display_includes_alias_and_source() {
        let err = CheckError::unreachable("default", "connection refused");
        assert_eq!(
            err.to_string(),
            "database 'default' is unreachable: connection refused"
        );
    }
}
