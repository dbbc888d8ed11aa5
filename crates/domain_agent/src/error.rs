//! Agent domain errors

use thiserror::Error;

/// Errors that can occur in the agent domain
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Termination date is required when status is Terminated")]
    MissingTerminationDate,

    #[error("Joining date cannot be after termination date")]
    JoiningAfterTermination,
}
