use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("missing fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("validation error: {0}")]
    Validation(String),
}

impl ModelError {
    pub fn invalid(field: &str, reason: impl std::fmt::Display) -> Self {
        Self::Validation(format!("{field}: {reason}"))
    }
}
