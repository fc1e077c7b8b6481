use thiserror::Error;

/// Result type alias using LikenessError
pub type Result<T> = std::result::Result<T, LikenessError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling and for asserting on failures in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Resolution
    UnresolvedPath,
    InvalidPath,
    DuplicateRegistration,

    // Comparison
    IntrospectionUnsupported,
    AssertionFailed,

    // Configuration/IO
    InvalidConfig,
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::UnresolvedPath => "ERR_UNRESOLVED_PATH",
            ExErrorKind::InvalidPath => "ERR_INVALID_PATH",
            ExErrorKind::DuplicateRegistration => "ERR_DUPLICATE_REGISTRATION",
            ExErrorKind::IntrospectionUnsupported => "ERR_INTROSPECTION_UNSUPPORTED",
            ExErrorKind::AssertionFailed => "ERR_ASSERTION_FAILED",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the context
/// (operation, path) that was being worked on when the failure happened.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the type path being resolved or registered
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for resolution, comparison and assertion failures
///
/// Discrepancies found while reconciling two values are never errors; they are
/// recorded in the comparison outcome. These variants cover the precondition
/// violations that abort a comparison outright.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LikenessError {
    /// Type path is not registered as a module, type or function
    #[error("Could not resolve type path: {path}")]
    UnresolvedPath { path: String },

    /// Type path was empty or had an empty segment
    #[error("Invalid type path: {path:?}")]
    EmptyPath { path: String },

    /// Path is already registered for a different entry
    #[error("Path {path} is already registered as {existing}")]
    DuplicateRegistration { path: String, existing: String },

    /// Strict comparison against a value with no attribute mapping
    #[error("{repr} does not support attribute introspection so cannot do strict comparison")]
    IntrospectionUnsupported { repr: String },

    /// An assertion helper found a mismatch
    #[error("{message}")]
    AssertionFailed { message: String },

    /// Registry configuration could not be parsed or applied
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Reading configuration from disk failed
    #[error("IO error: {message}")]
    Io { message: String },
}

impl LikenessError {
    /// Message of an assertion failure, if this is one
    pub fn assertion_message(&self) -> Option<&str> {
        match self {
            LikenessError::AssertionFailed { message } => Some(message),
            _ => None,
        }
    }
}

impl From<LikenessError> for ExError {
    fn from(err: LikenessError) -> Self {
        let message = err.to_string();
        match err {
            LikenessError::UnresolvedPath { path } => ExError::new(ExErrorKind::UnresolvedPath)
                .with_op("resolve")
                .with_path(path)
                .with_message(message),

            LikenessError::EmptyPath { path } => ExError::new(ExErrorKind::InvalidPath)
                .with_op("resolve")
                .with_path(path)
                .with_message(message),

            LikenessError::DuplicateRegistration { path, .. } => {
                ExError::new(ExErrorKind::DuplicateRegistration)
                    .with_op("register")
                    .with_path(path)
                    .with_message(message)
            }

            LikenessError::IntrospectionUnsupported { .. } => {
                ExError::new(ExErrorKind::IntrospectionUnsupported)
                    .with_op("reconcile")
                    .with_message(message)
            }

            LikenessError::AssertionFailed { .. } => {
                ExError::new(ExErrorKind::AssertionFailed).with_message(message)
            }

            LikenessError::InvalidConfig { .. } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(message)
            }

            LikenessError::Io { .. } => ExError::new(ExErrorKind::Io).with_message(message),
        }
    }
}

impl From<std::io::Error> for LikenessError {
    fn from(err: std::io::Error) -> Self {
        LikenessError::Io {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for LikenessError {
    fn from(err: toml::de::Error) -> Self {
        LikenessError::InvalidConfig {
            reason: err.to_string(),
        }
    }
}
