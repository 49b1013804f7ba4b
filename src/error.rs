//! Error taxonomy for path validation and Terraform generation.

use thiserror::Error;

/// Malformed endpoint input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Endpoint must contain at least one path segment (got {path:?})")]
    EmptyPath { path: String },
}

/// Failure raised inside one of the emitter phases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("resource {path} references parent {parent} which is not in the resource tree")]
    MissingParent { path: String, parent: String },
}

/// The single error a generation call reports. Wraps whatever aborted the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to generate Terraform configuration: {source}")]
pub struct GenerationError {
    source: EmitError,
}

impl GenerationError {
    /// Message of the underlying failure, without the generation prefix.
    pub fn cause_message(&self) -> String {
        self.source.to_string()
    }

    /// The validation error that aborted the call, if that was the root cause.
    pub fn validation(&self) -> Option<&ValidationError> {
        match &self.source {
            EmitError::Validation(e) => Some(e),
            EmitError::MissingParent { .. } => None,
        }
    }

    pub fn kind(&self) -> &EmitError {
        &self.source
    }
}

impl From<EmitError> for GenerationError {
    fn from(source: EmitError) -> Self {
        GenerationError { source }
    }
}

impl From<ValidationError> for GenerationError {
    fn from(e: ValidationError) -> Self {
        GenerationError {
            source: EmitError::Validation(e),
        }
    }
}
