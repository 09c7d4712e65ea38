use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHeader {
    pub key: String,
    pub value: String,
}

impl MessageHeader {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A message retrieved from a topic. Immutable once fetched; identified by
/// `(partition, offset)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    pub key: String,
    pub value: String,
    /// Epoch seconds.
    pub timestamp: i64,
    pub headers: Vec<MessageHeader>,
    pub key_size: u64,
    pub value_size: u64,
}

impl Message {
    pub fn identity(&self) -> (i32, i64) {
        (self.partition, self.offset)
    }
}

/// A message to be written, as assembled by the producer form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerRecord {
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<MessageHeader>,
}

impl ProducerRecord {
    /// Required-field validation, run before the record reaches the
    /// orchestrator: a value is mandatory, and a header may not have an
    /// empty key or value.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.value.is_empty() {
            return Err(DomainError::EmptyValue);
        }
        if self
            .headers
            .iter()
            .any(|h| h.key.is_empty() || h.value.is_empty())
        {
            return Err(DomainError::IncompleteHeader);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ProducerRecord {
        ProducerRecord {
            topic: "orders".to_string(),
            key: None,
            value: "{\"id\":1}".to_string(),
            headers: vec![],
        }
    }

    #[test]
    fn valid_record_passes() {
        assert_eq!(record().validate(), Ok(()));
    }

    #[test]
    fn empty_value_is_rejected() {
        let mut r = record();
        r.value.clear();
        assert_eq!(r.validate(), Err(DomainError::EmptyValue));
    }

    #[test]
    fn header_missing_key_or_value_is_rejected() {
        let mut r = record();
        r.headers.push(MessageHeader::new("trace-id", ""));
        assert_eq!(r.validate(), Err(DomainError::IncompleteHeader));

        let mut r = record();
        r.headers.push(MessageHeader::new("", "abc"));
        assert_eq!(r.validate(), Err(DomainError::IncompleteHeader));
    }
}
