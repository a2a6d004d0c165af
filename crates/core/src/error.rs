/// Domain-level error shared by every layer.
///
/// The variants are the error taxonomy the HTTP layer maps to status codes:
/// `Validation` and `NotFound` are caller mistakes and never retried,
/// `Conflict` is client-correctable, `Unavailable` is transient.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}
