use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::settings::FetchSettings;
use crate::application::topic_cache::{TopicCache, TopicCacheEntry};
use crate::domain::{ConnectionProfile, ProducerRecord};
use crate::ports::outgoing::broker_client::BrokerClient;

pub const FETCH_TOPICS_FAILED: &str = "Failed To Fetch Topics";
pub const FETCH_META_FAILED: &str = "Failed To Fetch Topic Meta";
pub const FETCH_DATA_FAILED: &str = "Failed To Fetch Data";
pub const FETCH_CONFIGS_FAILED: &str = "Failed To Fetch Configs";
pub const PRODUCE_FAILED: &str = "Failed To Produce Message";

/// The one loading/error pair shared by every orchestrator operation.
/// Concurrent operations race on it and the later completion wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStatus {
    pub loading: bool,
    pub error: Option<&'static str>,
}

#[derive(Default)]
struct PanelState {
    cache: TopicCache,
    current_topic: Option<String>,
    connection_id: Option<Uuid>,
    loading: bool,
    error: Option<&'static str>,
}

impl PanelState {
    /// Whether a response tagged with this connection/topic pair may still
    /// be merged. Responses for a deselected topic or a replaced connection
    /// are discarded rather than written under a stale key.
    fn is_current(&self, connection_id: Uuid, topic: &str) -> bool {
        self.connection_id == Some(connection_id) && self.current_topic.as_deref() == Some(topic)
    }

    fn finish_ok(&mut self) {
        self.loading = false;
        self.error = None;
    }

    fn finish_err(&mut self, message: &'static str) {
        self.loading = false;
        self.error = Some(message);
    }
}

/// Coordinates asynchronous broker operations and owns the topic cache.
/// Every operation converts failure into the shared status pair; rejections
/// never cross this boundary. Presentation code reads cloned snapshots only.
pub struct FetchOrchestrator {
    broker: Arc<dyn BrokerClient>,
    state: RwLock<PanelState>,
}

impl FetchOrchestrator {
    pub fn new(broker: Arc<dyn BrokerClient>) -> Self {
        Self {
            broker,
            state: RwLock::new(PanelState::default()),
        }
    }

    pub async fn status(&self) -> FetchStatus {
        let state = self.state.read().await;
        FetchStatus {
            loading: state.loading,
            error: state.error,
        }
    }

    pub async fn current_topic(&self) -> Option<String> {
        self.state.read().await.current_topic.clone()
    }

    pub async fn topic_names(&self) -> Vec<String> {
        self.state.read().await.cache.topic_names()
    }

    pub async fn entry(&self, topic: &str) -> Option<TopicCacheEntry> {
        self.state.read().await.cache.entry(topic).cloned()
    }

    /// Makes `topic` the one whose data the panel shows and clears any
    /// status left over from the previous topic.
    pub async fn select_topic(&self, topic: &str) {
        let mut state = self.state.write().await;
        state.current_topic = Some(topic.to_string());
        state.loading = false;
        state.error = None;
    }

    /// Refreshes the topic list for `conn`. Success resets the cache to
    /// empty entries for the listed topics; failure leaves the previous
    /// cache untouched.
    pub async fn list_topics(&self, conn: &ConnectionProfile) {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
            state.connection_id = Some(conn.id);
        }

        match self.broker.list_topics(conn).await {
            Ok(names) => {
                let mut state = self.state.write().await;
                if state.connection_id == Some(conn.id) {
                    state.cache.replace_topic_list(names);
                } else {
                    debug!(connection = %conn.id, "discarding topic list for replaced connection");
                }
                state.finish_ok();
            }
            Err(e) => {
                warn!(connection = %conn.name, error = %e, "topic listing failed");
                self.state.write().await.finish_err(FETCH_TOPICS_FAILED);
            }
        }
    }

    /// Fetches topic shape only, preserving any cached messages.
    pub async fn fetch_topic_meta(
        &self,
        conn: &ConnectionProfile,
        topic: &str,
        settings: &FetchSettings,
    ) {
        self.begin().await;

        match self
            .broker
            .fetch_meta(conn, topic, settings.message_count)
            .await
        {
            Ok(metadata) => {
                let mut state = self.state.write().await;
                if state.is_current(conn.id, topic) {
                    state.cache.merge_metadata(topic, metadata);
                } else {
                    debug!(topic, "discarding stale metadata response");
                }
                state.finish_ok();
            }
            Err(e) => {
                warn!(topic, error = %e, "metadata fetch failed");
                self.state.write().await.finish_err(FETCH_META_FAILED);
            }
        }
    }

    /// Fetches messages addressed by `settings`, replacing the topic's
    /// cached metadata and messages together.
    pub async fn fetch_topic_data(
        &self,
        conn: &ConnectionProfile,
        topic: &str,
        settings: &FetchSettings,
    ) {
        self.begin().await;

        let result = self
            .broker
            .fetch_messages(
                conn,
                topic,
                settings.message_count,
                settings.from_latest(),
                settings.explicit_address(),
            )
            .await;

        match result {
            Ok(data) => {
                let mut state = self.state.write().await;
                if state.is_current(conn.id, topic) {
                    state
                        .cache
                        .replace_messages(topic, data.metadata, data.messages);
                } else {
                    debug!(topic, "discarding stale message response");
                }
                state.finish_ok();
            }
            Err(e) => {
                warn!(topic, error = %e, "message fetch failed");
                self.state.write().await.finish_err(FETCH_DATA_FAILED);
            }
        }
    }

    /// Fetches the topic's config map into its existing cache entry.
    pub async fn fetch_topic_config(&self, conn: &ConnectionProfile, topic: &str) {
        self.begin().await;

        match self.broker.get_topic_config(conn, topic).await {
            Ok(config) => {
                let mut state = self.state.write().await;
                if state.is_current(conn.id, topic) {
                    match state.cache.set_config(topic, config) {
                        Ok(()) => state.finish_ok(),
                        Err(e) => {
                            warn!(topic, error = %e, "config arrived for undiscovered topic");
                            state.finish_err(FETCH_CONFIGS_FAILED);
                        }
                    }
                } else {
                    debug!(topic, "discarding stale config response");
                    state.finish_ok();
                }
            }
            Err(e) => {
                warn!(topic, error = %e, "config fetch failed");
                self.state.write().await.finish_err(FETCH_CONFIGS_FAILED);
            }
        }
    }

    /// Submits a record. The record is expected to have passed
    /// `ProducerRecord::validate` already. The cache is not refreshed here;
    /// callers re-issue `fetch_topic_data` to observe the write.
    pub async fn produce_message(&self, conn: &ConnectionProfile, record: ProducerRecord) {
        self.begin().await;

        match self.broker.produce_message(conn, record).await {
            Ok(ack) => {
                debug!(ack = %ack, "message produced");
                self.state.write().await.finish_ok();
            }
            Err(e) => {
                warn!(error = %e, "produce failed");
                self.state.write().await.finish_err(PRODUCE_FAILED);
            }
        }
    }

    async fn begin(&self) {
        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
    }
}
