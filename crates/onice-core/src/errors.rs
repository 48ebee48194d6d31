use onice_core_types::RunId;
use thiserror::Error;

/// Result type alias using OnIceError
pub type Result<T> = std::result::Result<T, OnIceError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure surfaced by the pipeline maps onto one of these kinds. Each
/// kind carries a stable code that log pipelines and callers can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,
    ConstraintViolation,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    ExternalService,
    Timeout,
    Concurrency,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether a fresh invocation of the job could plausibly succeed
    ///
    /// Nothing is retried in-process; this only informs the caller.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ExErrorKind::ExternalService
                | ExErrorKind::Timeout
                | ExErrorKind::Io
                | ExErrorKind::Concurrency
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification plus enough game context (game, event) to find
/// the offending input from a single log line.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    game_pk: Option<i64>,
    event_idx: Option<i64>,
    team_id: Option<i64>,
    run_id: Option<RunId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            game_pk: None,
            event_idx: None,
            team_id: None,
            run_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    pub fn with_game_pk(mut self, game_pk: i64) -> Self {
        self.game_pk = Some(game_pk);
        self
    }

    pub fn with_event_idx(mut self, event_idx: i64) -> Self {
        self.event_idx = Some(event_idx);
        self
    }

    pub fn with_team_id(mut self, team_id: i64) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
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

    pub fn game_pk(&self) -> Option<i64> {
        self.game_pk
    }

    pub fn event_idx(&self) -> Option<i64> {
        self.event_idx
    }

    pub fn team_id(&self) -> Option<i64> {
        self.team_id
    }

    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
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
        if let Some(game_pk) = self.game_pk {
            write!(f, " (game_pk: {})", game_pk)?;
        }
        if let Some(event_idx) = self.event_idx {
            write!(f, " (event_idx: {})", event_idx)?;
        }
        if let Some(team_id) = self.team_id {
            write!(f, " (team_id: {})", team_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised by the pure (non-I/O) parts of the pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OnIceError {
    /// The trigger message did not contain a game identifier
    #[error("Invalid game id: {input:?}")]
    InvalidGameId { input: String },

    /// Two events in the same game share an index
    #[error("Duplicate event index {event_idx} in game {game_pk}")]
    DuplicateEventIdx { game_pk: i64, event_idx: i64 },

    /// A status string read back from the ledger is not a known status
    #[error("Unknown game status: {value}")]
    UnknownGameStatus { value: String },
}

impl From<OnIceError> for ExError {
    fn from(err: OnIceError) -> Self {
        match err {
            OnIceError::InvalidGameId { input } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("parse_game_id")
                .with_message(format!("Not a game id: {:?}", input)),

            OnIceError::DuplicateEventIdx { game_pk, event_idx } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_game_pk(game_pk)
                    .with_event_idx(event_idx)
                    .with_message("Duplicate event index")
            }

            OnIceError::UnknownGameStatus { value } => {
                ExError::new(ExErrorKind::ConstraintViolation)
                    .with_op("read_game_status")
                    .with_message(format!("Unknown game status '{}'", value))
            }
        }
    }
}
