use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No structured payload found in model reply")]
    NoStructuredPayload,

    #[error("Model reply is not a JSON object")]
    NotAnObject,

    #[error("Model reply has no recipes array")]
    MissingRecipes,

    #[error("Model reply has no usable recipes")]
    NoUsableRecipes,
}
