use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{
    ConnectionProfile, Message, MessageHeader, PartitionAddress, PartitionMeta, ProducerRecord,
    TopicData, TopicMetadata,
};
use crate::ports::outgoing::broker_client::{BrokerClient, BrokerError};

/// In-memory stand-in for a cluster, used by tests and the demo binary.
/// Topics are seeded up front; produced messages append to a key-selected
/// partition. Logs never truncate, so the low watermark is always zero.
#[derive(Default)]
pub struct MemoryBroker {
    topics: RwLock<HashMap<String, Vec<Vec<Message>>>>,
    configs: RwLock<HashMap<String, HashMap<String, String>>>,
}

impl MemoryBroker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create_topic(&self, name: &str, partitions: usize) {
        self.topics
            .write()
            .await
            .insert(name.to_string(), vec![Vec::new(); partitions.max(1)]);
    }

    pub async fn set_topic_config(&self, name: &str, config: HashMap<String, String>) {
        self.configs.write().await.insert(name.to_string(), config);
    }

    /// Appends a message to the given partition, assigning the next offset.
    pub async fn seed_message(&self, topic: &str, partition: usize, key: &str, value: &str) {
        let mut topics = self.topics.write().await;
        let Some(partitions) = topics.get_mut(topic) else {
            return;
        };
        let Some(log) = partitions.get_mut(partition) else {
            return;
        };
        log.push(build_message(topic, partition as i32, log.len() as i64, key, value, vec![]));
    }

    fn check_reachable(conn: &ConnectionProfile) -> Result<(), BrokerError> {
        if conn.bootstrap_servers.is_empty() {
            return Err(BrokerError::Unreachable(
                "no bootstrap servers configured".to_string(),
            ));
        }
        Ok(())
    }

    fn metadata_of(partitions: &[Vec<Message>]) -> TopicMetadata {
        let metas: Vec<PartitionMeta> = partitions
            .iter()
            .map(|log| PartitionMeta {
                high: log.len() as i64,
                low: 0,
                count: log.len() as i64,
            })
            .collect();
        TopicMetadata {
            message_count: metas.iter().map(|m| m.count).sum(),
            partition_count: metas.len(),
            partitions: metas,
        }
    }
}

fn build_message(
    topic: &str,
    partition: i32,
    offset: i64,
    key: &str,
    value: &str,
    headers: Vec<MessageHeader>,
) -> Message {
    Message {
        topic: topic.to_string(),
        partition,
        offset,
        key: key.to_string(),
        value: value.to_string(),
        timestamp: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0),
        headers,
        key_size: key.len() as u64,
        value_size: value.len() as u64,
    }
}

fn partition_for_key(key: Option<&str>, partitions: usize) -> usize {
    match key {
        Some(key) if !key.is_empty() => {
            let mut hasher = DefaultHasher::new();
            key.hash(&mut hasher);
            (hasher.finish() % partitions as u64) as usize
        }
        _ => 0,
    }
}

#[async_trait]
impl BrokerClient for MemoryBroker {
    async fn list_topics(&self, conn: &ConnectionProfile) -> Result<Vec<String>, BrokerError> {
        Self::check_reachable(conn)?;
        let mut names: Vec<String> = self.topics.read().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn fetch_meta(
        &self,
        conn: &ConnectionProfile,
        topic: &str,
        _message_count: u32,
    ) -> Result<TopicMetadata, BrokerError> {
        Self::check_reachable(conn)?;
        let topics = self.topics.read().await;
        let partitions = topics
            .get(topic)
            .ok_or_else(|| BrokerError::UnknownTopic(topic.to_string()))?;
        Ok(Self::metadata_of(partitions))
    }

    async fn fetch_messages(
        &self,
        conn: &ConnectionProfile,
        topic: &str,
        message_count: u32,
        from_latest: bool,
        partition: Option<PartitionAddress>,
    ) -> Result<TopicData, BrokerError> {
        Self::check_reachable(conn)?;
        let topics = self.topics.read().await;
        let partitions = topics
            .get(topic)
            .ok_or_else(|| BrokerError::UnknownTopic(topic.to_string()))?;
        let metadata = Self::metadata_of(partitions);

        let mut messages = Vec::new();
        match partition {
            Some(address) if address.is_set() => {
                let log = partitions
                    .get(address.partition as usize)
                    .ok_or_else(|| BrokerError::UnknownTopic(topic.to_string()))?;
                let start = address.offset.max(0) as usize;
                messages.extend(
                    log.iter()
                        .skip(start)
                        .take(message_count as usize)
                        .cloned(),
                );
            }
            _ => {
                // The requested count is split evenly across partitions; a
                // share of zero means "whatever the partition holds".
                let share = message_count as usize / partitions.len();
                for log in partitions {
                    let take = if share == 0 {
                        log.len()
                    } else {
                        share.min(log.len())
                    };
                    let start = if from_latest { log.len() - take } else { 0 };
                    messages.extend(log.iter().skip(start).take(take).cloned());
                }
            }
        }

        debug!(topic, returned = messages.len(), "served message fetch");
        Ok(TopicData { metadata, messages })
    }

    async fn get_topic_config(
        &self,
        conn: &ConnectionProfile,
        topic: &str,
    ) -> Result<HashMap<String, String>, BrokerError> {
        Self::check_reachable(conn)?;
        if !self.topics.read().await.contains_key(topic) {
            return Err(BrokerError::UnknownTopic(topic.to_string()));
        }
        Ok(self
            .configs
            .read()
            .await
            .get(topic)
            .cloned()
            .unwrap_or_default())
    }

    async fn produce_message(
        &self,
        conn: &ConnectionProfile,
        record: ProducerRecord,
    ) -> Result<String, BrokerError> {
        Self::check_reachable(conn)?;
        let mut topics = self.topics.write().await;
        let partitions = topics
            .entry(record.topic.clone())
            .or_insert_with(|| vec![Vec::new()]);
        let index = partition_for_key(record.key.as_deref(), partitions.len());
        let log = &mut partitions[index];
        log.push(build_message(
            &record.topic,
            index as i32,
            log.len() as i64,
            record.key.as_deref().unwrap_or_default(),
            &record.value,
            record.headers,
        ));
        Ok("Message produced".to_string())
    }

    async fn validate_connection(&self, conn: &ConnectionProfile) -> Result<String, BrokerError> {
        Self::check_reachable(conn)?;
        Ok("Connection Validated".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> ConnectionProfile {
        ConnectionProfile::plaintext("local", "127.0.0.1:9092")
    }

    async fn seeded() -> MemoryBroker {
        let broker = MemoryBroker::new();
        broker.create_topic("orders", 2).await;
        for i in 0..6 {
            broker
                .seed_message("orders", i % 2, &format!("k{i}"), &format!("v{i}"))
                .await;
        }
        broker
    }

    #[tokio::test]
    async fn meta_reports_watermarks_per_partition() {
        let broker = seeded().await;
        let meta = broker.fetch_meta(&profile(), "orders", 50).await.unwrap();
        assert_eq!(meta.partition_count, 2);
        assert_eq!(meta.message_count, 6);
        assert_eq!(meta.partition_counts(), vec![3, 3]);
        assert_eq!(meta.partitions[0].high, 3);
        assert_eq!(meta.partitions[0].low, 0);
    }

    #[tokio::test]
    async fn from_latest_returns_partition_tails() {
        let broker = seeded().await;
        let data = broker
            .fetch_messages(&profile(), "orders", 2, true, None)
            .await
            .unwrap();
        // One message per partition, the newest in each.
        assert_eq!(data.messages.len(), 2);
        for message in &data.messages {
            assert_eq!(message.offset, 2);
        }
    }

    #[tokio::test]
    async fn explicit_address_reads_one_partition_from_offset() {
        let broker = seeded().await;
        let address = PartitionAddress {
            partition: 1,
            high: 3,
            offset: 1,
        };
        let data = broker
            .fetch_messages(&profile(), "orders", 50, false, Some(address))
            .await
            .unwrap();
        assert_eq!(data.messages.len(), 2);
        assert!(data.messages.iter().all(|m| m.partition == 1));
        assert_eq!(data.messages[0].offset, 1);
    }

    #[tokio::test]
    async fn produce_places_by_key_and_assigns_offsets() {
        let broker = seeded().await;
        let record = ProducerRecord {
            topic: "orders".to_string(),
            key: Some("stable-key".to_string()),
            value: "x".to_string(),
            headers: vec![MessageHeader::new("h", "1")],
        };
        broker
            .produce_message(&profile(), record.clone())
            .await
            .unwrap();
        broker.produce_message(&profile(), record).await.unwrap();

        let data = broker
            .fetch_messages(&profile(), "orders", 2000, false, None)
            .await
            .unwrap();
        let produced: Vec<&Message> = data
            .messages
            .iter()
            .filter(|m| m.key == "stable-key")
            .collect();
        assert_eq!(produced.len(), 2);
        // Same key lands in the same partition with increasing offsets.
        assert_eq!(produced[0].partition, produced[1].partition);
        assert_eq!(produced[1].offset, produced[0].offset + 1);
    }

    #[tokio::test]
    async fn unreachable_profile_is_rejected() {
        let broker = seeded().await;
        let mut conn = profile();
        conn.bootstrap_servers.clear();
        assert!(matches!(
            broker.validate_connection(&conn).await,
            Err(BrokerError::Unreachable(_))
        ));
        assert!(matches!(
            broker.list_topics(&conn).await,
            Err(BrokerError::Unreachable(_))
        ));
    }
}
