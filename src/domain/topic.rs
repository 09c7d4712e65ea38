use serde::{Deserialize, Serialize};

use crate::domain::message::Message;

/// Watermarks and message count for a single partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionMeta {
    pub high: i64,
    pub low: i64,
    pub count: i64,
}

/// Shape of a topic, independent of any fetched payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicMetadata {
    pub message_count: i64,
    pub partition_count: usize,
    pub partitions: Vec<PartitionMeta>,
}

impl TopicMetadata {
    /// Per-partition message counts, in partition order.
    pub fn partition_counts(&self) -> Vec<i64> {
        self.partitions.iter().map(|p| p.count).collect()
    }
}

/// Result of a message fetch: the messages plus the topic shape observed at
/// fetch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicData {
    pub metadata: TopicMetadata,
    pub messages: Vec<Message>,
}

/// An explicit read position: a chosen partition, its known high-watermark,
/// and the offset to read from. `-1` on every field means unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionAddress {
    pub partition: i32,
    pub high: i64,
    pub offset: i64,
}

impl PartitionAddress {
    pub const UNSET: PartitionAddress = PartitionAddress {
        partition: -1,
        high: -1,
        offset: -1,
    };

    pub fn is_set(&self) -> bool {
        self.partition >= 0
    }
}

impl Default for PartitionAddress {
    fn default() -> Self {
        Self::UNSET
    }
}
