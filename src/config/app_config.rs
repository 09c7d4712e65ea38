use std::collections::HashMap;
use std::sync::Arc;

use crate::adapters::outgoing::memory_broker::MemoryBroker;
use crate::application::orchestrator::FetchOrchestrator;
use crate::application::session::ConnectionSession;
use crate::ports::outgoing::broker_client::BrokerClient;

/// Wiring for the orchestration layer: one broker adapter, one
/// orchestrator over it, one connection session.
pub struct AppConfig {
    pub broker: Arc<dyn BrokerClient>,
    pub orchestrator: Arc<FetchOrchestrator>,
    pub session: ConnectionSession,
}

impl AppConfig {
    pub fn new(broker: Arc<dyn BrokerClient>) -> Self {
        let orchestrator = Arc::new(FetchOrchestrator::new(Arc::clone(&broker)));
        Self {
            broker,
            orchestrator,
            session: ConnectionSession::new(),
        }
    }

    /// Wiring over a seeded in-memory broker, for the demo binary and
    /// integration tests.
    pub async fn with_demo_broker() -> Self {
        let broker = MemoryBroker::new();
        broker.create_topic("orders", 3).await;
        broker.create_topic("payments", 1).await;
        broker.create_topic("_schemas", 1).await;

        for i in 0..12 {
            broker
                .seed_message(
                    "orders",
                    i % 3,
                    &format!("order-{i}"),
                    &format!("{{\"id\": {i}, \"total\": {}}}", i * 10),
                )
                .await;
        }
        broker
            .seed_message("payments", 0, "pay-1", "<payment><amount>10</amount></payment>")
            .await;
        broker
            .set_topic_config(
                "orders",
                HashMap::from([
                    ("cleanup.policy".to_string(), "delete".to_string()),
                    ("retention.ms".to_string(), "604800000".to_string()),
                ]),
            )
            .await;

        Self::new(Arc::new(broker))
    }
}
