use athena_core_types::RequestId;
use thiserror::Error;

/// Result type alias using AthenaError
pub type Result<T> = std::result::Result<T, AthenaError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and the messages sent back to the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input/Document
    InvalidInput,
    InvalidDocument,
    NotFound,

    // Extraction
    UnsupportedNodeType,
    MissingComponentKey,
    ComponentExtraction,

    // Host/Remote
    CapabilityMissing,
    RemoteSource,

    // Infrastructure
    Configuration,
    Serialization,
    Io,
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidDocument => "ERR_INVALID_DOCUMENT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::UnsupportedNodeType => "ERR_UNSUPPORTED_NODE_TYPE",
            ExErrorKind::MissingComponentKey => "ERR_MISSING_COMPONENT_KEY",
            ExErrorKind::ComponentExtraction => "ERR_COMPONENT_EXTRACTION",
            ExErrorKind::CapabilityMissing => "ERR_CAPABILITY_MISSING",
            ExErrorKind::RemoteSource => "ERR_REMOTE_SOURCE",
            ExErrorKind::Configuration => "ERR_CONFIGURATION",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether a failure of this kind is recovered locally (the batch goes on)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ExErrorKind::UnsupportedNodeType
                | ExErrorKind::MissingComponentKey
                | ExErrorKind::ComponentExtraction
                | ExErrorKind::RemoteSource
        )
    }
}

/// Canonical structured error with context
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    page: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error of the given kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            page: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Set the operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Set the entity (node id or component key) context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Set the page context
    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    /// Set the request ID for correlation
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Set the error message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn page(&self) -> Option<&str> {
        self.page.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
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
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(page) = &self.page {
            write!(f, " (page: {})", page)?;
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

/// Domain errors raised while extracting, exporting and routing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AthenaError {
    /// A node kind that has no structure node type
    #[error("Unsupported node type {node_type} for node {node_id}")]
    UnsupportedNodeType { node_id: String, node_type: String },

    /// A component or variant without a publish key
    #[error("Component {name} ({node_id}) has no key")]
    MissingComponentKey { node_id: String, name: String },

    /// A single component failed to describe; carries the formatted context
    #[error("Failed to process \"{node_name}\" on page \"{page}\": {reason}")]
    ComponentExtraction {
        page: String,
        node_name: String,
        reason: String,
    },

    /// The host does not expose a capability an action needs
    #[error("Host capability unavailable: {capability}")]
    CapabilityMissing { capability: String },

    /// Fetching or parsing the remote token document failed
    #[error("Remote token source {url} failed: {reason}")]
    RemoteSource { url: String, reason: String },

    #[error("Page not found: {page_id}")]
    PageNotFound { page_id: String },

    #[error("Invalid document: {reason}")]
    InvalidDocument { reason: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AthenaError {
    /// Wrap a component-level failure with the page and node it happened on
    pub fn component_failure(
        page: impl Into<String>,
        node_name: impl Into<String>,
        cause: &AthenaError,
    ) -> Self {
        AthenaError::ComponentExtraction {
            page: page.into(),
            node_name: node_name.into(),
            reason: cause.to_string(),
        }
    }
}

impl From<AthenaError> for ExError {
    fn from(err: AthenaError) -> Self {
        match err {
            AthenaError::UnsupportedNodeType { node_id, node_type } => {
                ExError::new(ExErrorKind::UnsupportedNodeType)
                    .with_entity_id(node_id)
                    .with_message(format!("No structure type for node kind {}", node_type))
            }

            AthenaError::MissingComponentKey { node_id, name } => {
                ExError::new(ExErrorKind::MissingComponentKey)
                    .with_entity_id(node_id)
                    .with_message(format!("Component {} has no key", name))
            }

            AthenaError::ComponentExtraction {
                page,
                node_name,
                reason,
            } => ExError::new(ExErrorKind::ComponentExtraction)
                .with_entity_id(node_name)
                .with_page(page)
                .with_message(reason),

            AthenaError::CapabilityMissing { capability } => {
                ExError::new(ExErrorKind::CapabilityMissing)
                    .with_message(format!("Host capability unavailable: {}", capability))
            }

            AthenaError::RemoteSource { url, reason } => ExError::new(ExErrorKind::RemoteSource)
                .with_entity_id(url)
                .with_message(reason),

            AthenaError::PageNotFound { page_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(page_id)
                .with_message("Page not found"),

            AthenaError::InvalidDocument { reason } => {
                ExError::new(ExErrorKind::InvalidDocument).with_message(reason)
            }

            AthenaError::Config { message } => {
                ExError::new(ExErrorKind::Configuration).with_message(message)
            }

            AthenaError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            AthenaError::Io { message } => ExError::new(ExErrorKind::Io).with_message(message),

            AthenaError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to AthenaError
impl From<serde_json::Error> for AthenaError {
    fn from(err: serde_json::Error) -> Self {
        AthenaError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AthenaError {
    fn from(err: std::io::Error) -> Self {
        AthenaError::Io {
            message: err.to_string(),
        }
    }
}

impl From<config::ConfigError> for AthenaError {
    fn from(err: config::ConfigError) -> Self {
        AthenaError::Config {
            message: err.to_string(),
        }
    }
}
