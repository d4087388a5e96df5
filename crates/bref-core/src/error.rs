//! Error taxonomy for the packaging pipeline.
//!
//! Every failure is fatal to the operation that raised it: there are no
//! retries anywhere in the pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrefError {
    /// A required project file is absent. Raised before any side effect.
    #[error("Missing required file(s): {}. Run `bref init` to set up the project first.", missing.join(", "))]
    MissingProjectFiles { missing: Vec<String> },

    /// `.bref.yml` exists but could not be parsed.
    #[error("Invalid .bref.yml: {0}")]
    Config(#[from] serde_yaml::Error),

    /// An external command exited non-zero. Carries the command and its
    /// combined output for diagnostics.
    #[error("Command `{command}` exited with code {code}:\n{output}")]
    CommandFailed {
        command: String,
        code: i32,
        output: String,
    },

    /// The PHP runtime archive could not be fetched.
    #[error("Failed to download the PHP runtime from {url}: {reason}")]
    Download { url: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
