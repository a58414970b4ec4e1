use serde::{Deserialize, Serialize};

use super::QueueError;

/// Flat `{ success, message }` view of an operation result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Outcome {
    /// Whether the operation went through.
    pub success: bool,
    /// [`Outcome::SUCCESS_MESSAGE`] or the error's display text.
    pub message: String,
}

impl Outcome {
    /// Message carried by every successful outcome.
    pub const SUCCESS_MESSAGE: &'static str = "Success.";

    /// A successful outcome.
    pub fn success() -> Self {
        Self {
            success: true,
            message: Self::SUCCESS_MESSAGE.to_string(),
        }
    }

    /// A failed outcome carrying `error`'s message.
    pub fn failure(error: &QueueError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
        }
    }

    /// The outcome of an operation rejected while frozen.
    pub fn frozen() -> Self {
        Self::failure(&QueueError::Frozen)
    }

    /// The outcome of removing an item that is not queued.
    pub fn not_found() -> Self {
        Self::failure(&QueueError::NotFound)
    }
}

impl From<QueueError> for Outcome {
    fn from(error: QueueError) -> Self {
        Self::failure(&error)
    }
}

impl<T> From<&Result<T, QueueError>> for Outcome {
    fn from(result: &Result<T, QueueError>) -> Self {
        match result {
            Ok(_) => Self::success(),
            Err(error) => Self::failure(error),
        }
    }
}

impl<T> From<Result<T, QueueError>> for Outcome {
    fn from(result: Result<T, QueueError>) -> Self {
        Self::from(&result)
    }
}
