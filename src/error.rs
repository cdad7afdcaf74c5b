use rusoto_autoscaling::{
    DeleteLifecycleHookError, DescribeLifecycleHooksError, PutLifecycleHookError,
};
use rusoto_core::RusotoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifecycleHookError {
    #[error("invalid lifecycle hook parameters: {0}")]
    InvalidEvent(#[from] serde_json::Error),
    #[error("{0} is required when state is present")]
    MissingParameter(&'static str),
    #[error("invalid value for {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("lifecycle hook in describe response has no {0}")]
    NoneValue(&'static str),
    #[error("Failed to get Lifecycle Hook")]
    DescribeHooksError(#[from] RusotoError<DescribeLifecycleHooksError>),
    #[error("Failed to create Lifecycle Hook")]
    PutHookError(#[from] RusotoError<PutLifecycleHookError>),
    #[error("Failed to delete Lifecycle Hook")]
    DeleteHookError(#[from] RusotoError<DeleteLifecycleHookError>),
}

impl LifecycleHookError {
    /// AWS error code of a failed provider call, when AWS sent a known one.
    pub fn provider_code(&self) -> Option<&'static str> {
        match self {
            LifecycleHookError::DescribeHooksError(RusotoError::Service(error)) => match error {
                DescribeLifecycleHooksError::ResourceContentionFault(_) => Some("ResourceContention"),
            },
            LifecycleHookError::PutHookError(RusotoError::Service(error)) => match error {
                PutLifecycleHookError::LimitExceededFault(_) => Some("LimitExceeded"),
                PutLifecycleHookError::ResourceContentionFault(_) => Some("ResourceContention"),
            },
            LifecycleHookError::DeleteHookError(RusotoError::Service(error)) => match error {
                DeleteLifecycleHookError::ResourceContentionFault(_) => Some("ResourceContention"),
            },
            _ => None,
        }
    }

    /// Detail reported by AWS for failed provider calls, prefixed with the error
    /// code when there is one. `None` for local errors.
    pub fn provider_detail(&self) -> Option<String> {
        let message = match self {
            LifecycleHookError::DescribeHooksError(error) => error.to_string(),
            LifecycleHookError::PutHookError(error) => error.to_string(),
            LifecycleHookError::DeleteHookError(error) => error.to_string(),
            _ => return None,
        };
        Some(match self.provider_code() {
            Some(code) => format!("{}: {}", code, message),
            None => message,
        })
    }

    /// Message handed back to the caller: the static context followed by the
    /// provider detail when there is one.
    pub fn failure_message(&self) -> String {
        match self.provider_detail() {
            Some(detail) => format!("{}: {}", self, detail),
            None => self.to_string(),
        }
    }
}
