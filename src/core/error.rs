//! Error handling for resdeps
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** ([`ResError`]) for the few hard failures the engine has
//! 2. **User-friendly messages** ([`ErrorContext`]) with suggestions for CLI users
//!
//! Most problems the resolver meets are *soft*: a missing file, a malformed type
//! property or an unknown header-prefix callback is logged through `tracing` and
//! resolution continues. Only the conditions below surface as errors:
//!
//! - [`ResError::ConfigError`] - a configuration name that does not resolve to a mapping
//! - [`ResError::ConfigParseError`] - a configuration file that cannot be parsed
//! - [`ResError::CyclicGroup`] - a group that (transitively) contains itself
//! - [`ResError::UnknownResourceType`] - a type named on the command line that is not defined
//! - [`ResError::InvalidReference`] - a group member that cannot be parsed
//!
//! Fallible functions return [`anyhow::Result`]; the specific variants are created as
//! [`ResError`] and recovered with `downcast_ref` where a caller needs to branch on them.
//!
//! # Examples
//!
//! ```rust,no_run
//! use resdeps::core::{ResError, user_friendly_error};
//!
//! fn load() -> anyhow::Result<()> {
//!     Err(ResError::ConfigError {
//!         message: "Invalid config 'site.resources'".to_string(),
//!     }
//!     .into())
//! }
//!
//! if let Err(e) = load() {
//!     user_friendly_error(e).display();
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for resdeps operations
#[derive(Error, Debug)]
pub enum ResError {
    /// A configuration name did not resolve to a mapping
    ///
    /// Raised by the config importer when a named configuration is missing from the
    /// store or resolves to a scalar or list instead of a mapping.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// A configuration file could not be parsed
    #[error("Invalid configuration file syntax in {file}")]
    ConfigParseError {
        /// Path to the file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// Group expansion re-entered a group that is still being expanded
    ///
    /// # Fields
    /// - `chain`: the expansion path, rendered as `type:name → ... → type:name`
    #[error("Cyclic group reference detected: {chain}")]
    CyclicGroup {
        /// The group chain that closes the cycle
        chain: String,
    },

    /// A resource type was requested that has no definition
    #[error("Unknown resource type: {name}")]
    UnknownResourceType {
        /// The type name that was requested
        name: String,
        /// Type names that are defined
        known: Vec<String>,
    },

    /// A group member reference could not be parsed
    #[error("Invalid resource reference '{reference}': {reason}")]
    InvalidReference {
        /// The raw reference string
        reference: String,
        /// Why it was rejected
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Error wrapper that adds details and a suggestion for display
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: anyhow::Error,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self {
            error: error.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] with suggestions where one is known.
///
/// The error chain is walked so that a [`ResError`] wrapped in `anyhow` context is
/// still recognised.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let mut context = None;
    for cause in error.chain() {
        if let Some(res_error) = cause.downcast_ref::<ResError>() {
            context = Some(describe(res_error));
            break;
        }
        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            context = Some(describe_io(io_error));
            break;
        }
    }

    let (details, suggestion) = context.unwrap_or((None, None));
    let mut ctx = ErrorContext::new(error);
    if let Some(details) = details {
        ctx = ctx.with_details(details);
    }
    if let Some(suggestion) = suggestion {
        ctx = ctx.with_suggestion(suggestion);
    }
    ctx
}

fn describe(error: &ResError) -> (Option<String>, Option<String>) {
    match error {
        ResError::ConfigError { .. } => (
            Some("The configuration name must point at a table of resource types".to_string()),
            Some("Check the --section name and the structure of the configuration file".to_string()),
        ),
        ResError::ConfigParseError { reason, .. } => (
            Some(reason.clone()),
            Some("Fix the syntax error; the format is chosen from the file extension (.toml, .json, .yaml)".to_string()),
        ),
        ResError::CyclicGroup { .. } => (
            Some("A group may not contain itself, directly or through other groups".to_string()),
            Some("Run 'resdeps check' to list every cycle in the configuration".to_string()),
        ),
        ResError::UnknownResourceType { name, known } => {
            let suggestion = closest_match(name, known)
                .map(|m| format!("Did you mean '{m}'?"))
                .unwrap_or_else(|| format!("Defined types: {}", known.join(", ")));
            (None, Some(suggestion))
        }
        ResError::InvalidReference { .. } => (
            Some("Group members use the forms 'name', '!name', 'type:name' or '!type:name'".to_string()),
            None,
        ),
        ResError::IoError(io) => describe_io(io),
    }
}

fn describe_io(error: &std::io::Error) -> (Option<String>, Option<String>) {
    if error.kind() == std::io::ErrorKind::NotFound {
        (
            Some("A required file or directory could not be found".to_string()),
            Some("Check that the configuration path is correct".to_string()),
        )
    } else {
        (None, None)
    }
}

/// Find the candidate closest to `name`, if any is reasonably close.
pub(crate) fn closest_match<'a>(name: &str, candidates: &'a [String]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|c| (strsim::levenshtein(name, c), c))
        .filter(|(distance, _)| *distance <= 2)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, c)| c.as_str())
}
