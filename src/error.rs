/// Broad failure classes surfaced by the engine and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A `ParameterSet` invariant (or a model calibration constant) is violated.
    InvalidParameter,
    /// Sweep bounds are non-finite, non-monotonic, or the step is not positive.
    InvalidSweep,
    /// A sensitivity run named a field that does not exist.
    UnknownField,
    /// Reading or writing a file failed.
    Io,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::InvalidParameter => 2,
            ErrorKind::InvalidSweep => 3,
            ErrorKind::UnknownField => 4,
            ErrorKind::Io => 5,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidParameter, message)
    }

    pub fn invalid_sweep(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSweep, message)
    }

    pub fn unknown_field(name: &str) -> Self {
        Self::new(
            ErrorKind::UnknownField,
            format!("Unknown parameter field '{name}'."),
        )
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("exit_code", &self.exit_code())
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
