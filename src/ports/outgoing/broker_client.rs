use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ConnectionProfile, PartitionAddress, ProducerRecord, TopicData, TopicMetadata};

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("broker unreachable: {0}")]
    Unreachable(String),
    #[error("not authorized: {0}")]
    Unauthorized(String),
    #[error("unknown topic or partition: {0}")]
    UnknownTopic(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The broker-access capability. Implementations talk to a real cluster (or
/// stand in for one); the orchestration layer treats every call as an
/// asynchronous, possibly-failing black box.
#[async_trait]
pub trait BrokerClient: Send + Sync {
    async fn list_topics(&self, conn: &ConnectionProfile) -> Result<Vec<String>, BrokerError>;

    async fn fetch_meta(
        &self,
        conn: &ConnectionProfile,
        topic: &str,
        message_count: u32,
    ) -> Result<TopicMetadata, BrokerError>;

    async fn fetch_messages(
        &self,
        conn: &ConnectionProfile,
        topic: &str,
        message_count: u32,
        from_latest: bool,
        partition: Option<PartitionAddress>,
    ) -> Result<TopicData, BrokerError>;

    async fn get_topic_config(
        &self,
        conn: &ConnectionProfile,
        topic: &str,
    ) -> Result<HashMap<String, String>, BrokerError>;

    /// Returns the broker's acknowledgement string.
    async fn produce_message(
        &self,
        conn: &ConnectionProfile,
        record: ProducerRecord,
    ) -> Result<String, BrokerError>;

    /// Returns the broker's acknowledgement string.
    async fn validate_connection(&self, conn: &ConnectionProfile) -> Result<String, BrokerError>;
}
