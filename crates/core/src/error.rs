//! Runtime error types.
//!
//! Every check happens at the point of use, just before the access it
//! guards, and fails the whole running program. The driver reports the
//! operator name together with what the operator needed.

use std::fmt;
use std::io;

/// Error raised while executing Joy terms.
#[derive(Debug)]
pub enum RuntimeError {
    /// Fewer stack items than the operator requires
    Arity { op: &'static str, needed: &'static str },
    /// Wrong kind of value at a required position
    Type { op: &'static str, needed: &'static str },
    /// A non-empty aggregate was required
    EmptyAggregate { op: &'static str, needed: &'static str },
    /// Aggregate index past the end
    Index { op: &'static str },
    /// Unbound user word executed while undefined words are errors
    UndefinedWord { name: String },
    DivisionByZero { op: &'static str, needed: &'static str },
    /// The node arena is exhausted even after a full collection
    OutOfMemory { capacity: usize },
    /// A malformed node reached dispatch
    Internal(String),
    /// `intern` was given something that is not an identifier
    InvalidName { name: String },
    SymbolTableFull { capacity: usize },
    /// Operation needs a collaborator that is not attached (e.g. a reader)
    Unsupported { op: &'static str, reason: &'static str },
    Io(io::Error),
    /// `abort` was executed or SIGINT was received
    Aborted,
    /// `quit` was executed
    Quit(i32),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::Arity { op, needed }
            | RuntimeError::Type { op, needed }
            | RuntimeError::EmptyAggregate { op, needed }
            | RuntimeError::DivisionByZero { op, needed } => {
                write!(f, "run time error: {} needed for {}", needed, op)
            }
            RuntimeError::Index { op } => {
                write!(f, "run time error: smaller index needed for {}", op)
            }
            RuntimeError::UndefinedWord { name } => {
                write!(f, "run time error: definition needed for {}", name)
            }
            RuntimeError::OutOfMemory { capacity } => {
                write!(f, "memory exhausted ({} nodes)", capacity)
            }
            RuntimeError::Internal(msg) => write!(f, "internal error: {}", msg),
            RuntimeError::InvalidName { name } => {
                write!(f, "run time error: valid name needed for {}", name)
            }
            RuntimeError::SymbolTableFull { capacity } => {
                write!(f, "symbol table overflow ({} entries)", capacity)
            }
            RuntimeError::Unsupported { op, reason } => {
                write!(f, "run time error: {} needed for {}", reason, op)
            }
            RuntimeError::Io(e) => write!(f, "I/O error: {}", e),
            RuntimeError::Aborted => write!(f, "execution aborted"),
            RuntimeError::Quit(code) => write!(f, "quit with status {}", code),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuntimeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RuntimeError {
    fn from(e: io::Error) -> Self {
        RuntimeError::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Error loading a [`crate::config::Config`].
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config: {}", e),
            ConfigError::Parse(e) => write!(f, "invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_operator() {
        let err = RuntimeError::Arity {
            op: "swap",
            needed: "two parameters",
        };
        assert_eq!(
            err.to_string(),
            "run time error: two parameters needed for swap"
        );
    }

    #[test]
    fn test_undefined_word_display() {
        let err = RuntimeError::UndefinedWord {
            name: "frobnicate".to_string(),
        };
        assert!(err.to_string().contains("frobnicate"));
    }

    #[test]
    fn test_io_conversion() {
        let err: RuntimeError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, RuntimeError::Io(_)));
    }
}
