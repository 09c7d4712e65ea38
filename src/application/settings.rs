use serde::{Deserialize, Serialize};

use crate::domain::PartitionAddress;

pub const MIN_MESSAGE_COUNT: u32 = 1;
pub const MAX_MESSAGE_COUNT: u32 = 2000;

/// Strategy for choosing where a fetch starts reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetMode {
    Earliest,
    Latest,
    /// Read from an explicitly chosen partition and offset.
    #[serde(rename = "offset")]
    Explicit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataFormat {
    Json,
    Xml,
    Hex,
    Text,
}

/// Which part of a message the detail panel renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataField {
    Key,
    Value,
    Partition,
    Offset,
    Timestamp,
    Headers,
}

/// How to address messages to retrieve, plus the selected render format and
/// field. A persistent configuration object mutated by user action; the
/// transition methods below keep its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchSettings {
    pub offset_mode: OffsetMode,
    /// Meaningful only while `offset_mode` is `Explicit`; otherwise held at
    /// the unset sentinel.
    pub partition: PartitionAddress,
    pub message_count: u32,
    pub data_format: DataFormat,
    pub data_field: DataField,
    pub panel_visible: bool,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            offset_mode: OffsetMode::Latest,
            partition: PartitionAddress::UNSET,
            message_count: 50,
            data_format: DataFormat::Json,
            data_field: DataField::Value,
            panel_visible: true,
        }
    }
}

impl FetchSettings {
    /// Leaving `Explicit` always resets the partition address to unset.
    pub fn set_offset_mode(&mut self, mode: OffsetMode) {
        self.offset_mode = mode;
        if mode != OffsetMode::Explicit {
            self.partition = PartitionAddress::UNSET;
        }
    }

    /// Stores the chosen partition and its known high-watermark. The read
    /// offset stays as it was until `set_offset` picks one.
    pub fn set_partition(&mut self, partition: i32, high: i64) {
        self.partition.partition = partition;
        self.partition.high = high;
    }

    /// No upper-bound check: the broker enforces its own offset range.
    pub fn set_offset(&mut self, offset: i64) {
        self.partition.offset = offset;
    }

    pub fn set_message_count(&mut self, count: u32) {
        self.message_count = count.clamp(MIN_MESSAGE_COUNT, MAX_MESSAGE_COUNT);
    }

    /// The partition address to send with a fetch, when one applies.
    pub fn explicit_address(&self) -> Option<PartitionAddress> {
        (self.offset_mode == OffsetMode::Explicit && self.partition.is_set())
            .then_some(self.partition)
    }

    pub fn from_latest(&self) -> bool {
        self.offset_mode == OffsetMode::Latest
    }
}
