//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::{
    db::progress_queries::ProgressUpdate,
    models::{Plan, ProgressRecord},
};

/// Wrapper type for displaying the result of create operations.
///
/// Formats a success message with the resource ID followed by the full
/// resource details.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created plan with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<ProgressRecord> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created progress record with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the outcome of a milestone completion or
/// percentage refresh, including any badges granted by the call.
pub struct CompletionResult(pub ProgressUpdate);

impl fmt::Display for CompletionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.new_badges.is_empty() {
            writeln!(f, "Progress at {:.1}%.", self.0.record.percent_complete)?;
        } else {
            writeln!(
                f,
                "Progress at {:.1}%. New badges: {}",
                self.0.record.percent_complete,
                self.0.new_badges.join(", ")
            )?;
        }
        writeln!(f)?;
        write!(f, "{}", self.0.record)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult {
    pub resource_type: String,
    pub id: u64,
}

impl DeleteResult {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource_type: &str, id: u64) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            id,
        }
    }
}

impl fmt::Display for DeleteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deleted {} with ID: {}", self.resource_type, self.id)
    }
}
