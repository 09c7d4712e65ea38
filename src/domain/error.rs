use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("message value is required")]
    EmptyValue,
    #[error("header key and value are required")]
    IncompleteHeader,
    #[error("unknown topic: {0}")]
    UnknownTopic(String),
}
