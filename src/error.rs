use praise::PraiseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("Invalid {name} '{value}': {reason}")]
    InvalidArgument {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Praise(#[from] PraiseError),
}

impl CliError {
    pub fn invalid(name: &'static str, value: &str, reason: impl Into<String>) -> Self {
        CliError::InvalidArgument {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
