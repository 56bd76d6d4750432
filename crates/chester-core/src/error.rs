//! Error handling for the ChesterGL build
//!
//! Every stage of the build fails fast: errors are never retried or
//! recovered locally, they bubble up to the binary which reports them and
//! exits.

use thiserror::Error;

/// Main error type for build operations
#[derive(Error, Debug)]
pub enum ChesterError {
    /// Invalid or inconsistent configuration
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        field: Option<String>,
    },

    /// Downloading an extern stub failed
    #[error("Failed to fetch extern {name} from {url}: {message}")]
    Fetch {
        name: String,
        url: String,
        message: String,
    },

    /// An external tool could not be started at all
    #[error("Failed to launch {tool}: {message}")]
    ToolLaunch {
        tool: String,
        message: String,
    },

    /// An external tool ran and reported failure
    #[error("{tool} exited with {}", describe_code(.code))]
    ToolFailed {
        tool: String,
        code: Option<i32>,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

fn describe_code(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl ChesterError {
    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            field: None,
        }
    }

    /// Create a configuration error naming the offending field
    pub fn configuration_with_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Configuration {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a fetch error for a single extern file
    pub fn fetch<N: Into<String>, U: Into<String>, M: Into<String>>(name: N, url: U, message: M) -> Self {
        Self::Fetch {
            name: name.into(),
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an error for a tool that could not be spawned
    pub fn tool_launch<T: Into<String>, M: Into<String>>(tool: T, message: M) -> Self {
        Self::ToolLaunch {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create an error for a tool that exited unsuccessfully
    pub fn tool_failed<T: Into<String>>(tool: T, code: Option<i32>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            code,
        }
    }

    /// Whether this error came from the configuration stage
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. } | Self::Toml(_))
    }
}

/// Result type for build operations
pub type ChesterResult<T> = Result<T, ChesterError>;
