use std::collections::HashMap;

use crate::domain::{DomainError, Message, TopicMetadata};

/// Topics whose names start with this marker are broker-internal and never
/// shown.
pub const INTERNAL_TOPIC_MARKER: char = '_';

/// Last-known state for one topic. `metadata` and `messages` are replaced by
/// fetches; `config` only by an explicit config request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopicCacheEntry {
    pub metadata: Option<TopicMetadata>,
    pub messages: Vec<Message>,
    pub config: HashMap<String, String>,
}

/// In-memory map from topic name to its last-known state. Owned exclusively
/// by the orchestrator; presentation code only ever sees clones.
#[derive(Debug, Default)]
pub struct TopicCache {
    entries: HashMap<String, TopicCacheEntry>,
}

impl TopicCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the cache to one empty entry per listed topic, dropping
    /// internal topics. Runs whenever the topic list is refreshed.
    pub fn replace_topic_list<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.clear();
        for name in names {
            let name = name.into();
            if name.starts_with(INTERNAL_TOPIC_MARKER) {
                continue;
            }
            self.entries.insert(name, TopicCacheEntry::default());
        }
    }

    /// Upserts a topic's metadata while keeping any fetched messages.
    pub fn merge_metadata(&mut self, topic: &str, metadata: TopicMetadata) {
        let entry = self.entries.entry(topic.to_string()).or_default();
        entry.metadata = Some(metadata);
        entry.config.clear();
    }

    /// Replaces a topic's metadata and messages together; a message fetch
    /// always carries its own fresh metadata.
    pub fn replace_messages(&mut self, topic: &str, metadata: TopicMetadata, messages: Vec<Message>) {
        let entry = self.entries.entry(topic.to_string()).or_default();
        entry.metadata = Some(metadata);
        entry.messages = messages;
        entry.config.clear();
    }

    /// Stores a topic's config. The entry must already exist: topics are
    /// discovered before they are configured.
    pub fn set_config(
        &mut self,
        topic: &str,
        config: HashMap<String, String>,
    ) -> Result<(), DomainError> {
        match self.entries.get_mut(topic) {
            Some(entry) => {
                entry.config = config;
                Ok(())
            }
            None => Err(DomainError::UnknownTopic(topic.to_string())),
        }
    }

    pub fn entry(&self, topic: &str) -> Option<&TopicCacheEntry> {
        self.entries.get(topic)
    }

    pub fn topic_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
