use resource_domain::error::ResourceError;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("resource: {0}")]
    Resource(#[from] ResourceError),

    #[error("behavior not found: {0}")]
    BehaviorNotFound(String),

    #[error("behavior config not found: {0}")]
    BehaviorConfigNotFound(String),

    #[error("behavior already registered: behavior={behavior}")]
    AlreadyRegisteredBehavior { behavior: String },

    #[error("unsupported operation: {operation}")]
    UnsupportedOperation { operation: String },

    #[error("behavior failed: behavior={behavior}, operation={operation}, reason={reason}")]
    Behavior {
        behavior: String,
        operation: String,
        reason: String,
    },
}
