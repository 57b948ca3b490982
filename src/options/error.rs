use std::fmt;

/// Errors encountered while reading an options file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    Io(String),
    Parse(String),
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Parse(msg) => write!(f, "TOML parse error: {msg}"),
        }
    }
}

impl std::error::Error for OptionsError {}

/// Non-fatal problems found while resolving user options. Each one has already
/// been repaired with the shipped default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsWarning {
    /// A section that must be a table was replaced by a scalar.
    ConfigurationShape { section: String },
    /// A recognized leaf held a value of the wrong type or range.
    InvalidValue { key: String, reason: String },
}

impl fmt::Display for OptionsWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigurationShape { section } => {
                write!(f, "section {section} must be a table; using defaults")
            }
            Self::InvalidValue { key, reason } => {
                write!(f, "invalid value for {key}: {reason}; using default")
            }
        }
    }
}
