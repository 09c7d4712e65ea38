use thiserror::Error;

use crate::domain::error::DomainError;
use crate::ports::outgoing::broker_client::BrokerError;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Broker(#[from] BrokerError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ApplicationError>;
