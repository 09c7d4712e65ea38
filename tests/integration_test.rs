use kafka_trail::adapters::format::{render_field, NO_DATA};
use kafka_trail::application::orchestrator::FETCH_DATA_FAILED;
use kafka_trail::application::settings::{DataField, DataFormat, FetchSettings, OffsetMode};
use kafka_trail::application::ValidationStatus;
use kafka_trail::config::AppConfig;
use kafka_trail::domain::{ConnectionProfile, MessageHeader, ProducerRecord};

fn earliest(count: u32) -> FetchSettings {
    let mut settings = FetchSettings::default();
    settings.set_offset_mode(OffsetMode::Earliest);
    settings.set_message_count(count);
    settings
}

#[tokio::test]
async fn browse_cycle_populates_cache_within_requested_bounds() {
    let config = AppConfig::with_demo_broker().await;
    let profile = ConnectionProfile::plaintext("demo", "127.0.0.1:9092");

    config.session.activate(profile.clone()).await;
    let status = config.session.validate(config.broker.as_ref()).await;
    assert_eq!(
        status,
        ValidationStatus::Validated("Connection Validated".to_string())
    );

    let orchestrator = &config.orchestrator;
    orchestrator.list_topics(&profile).await;

    // Internal topics never surface.
    assert_eq!(orchestrator.topic_names().await, vec!["orders", "payments"]);

    orchestrator.select_topic("orders").await;
    orchestrator
        .fetch_topic_data(&profile, "orders", &earliest(50))
        .await;

    let status = orchestrator.status().await;
    assert!(!status.loading);
    assert_eq!(status.error, None);

    let entry = orchestrator.entry("orders").await.unwrap();
    assert!(entry.messages.len() <= 50);
    assert!(!entry.messages.is_empty());

    let metadata = entry.metadata.as_ref().unwrap();
    assert_eq!(metadata.partition_count, metadata.partitions.len());
    assert_eq!(
        metadata.message_count,
        metadata.partition_counts().iter().sum::<i64>()
    );
}

#[tokio::test]
async fn fetched_payloads_render_under_every_format() {
    let config = AppConfig::with_demo_broker().await;
    let profile = ConnectionProfile::plaintext("demo", "127.0.0.1:9092");

    let orchestrator = &config.orchestrator;
    orchestrator.list_topics(&profile).await;
    orchestrator.select_topic("orders").await;
    orchestrator
        .fetch_topic_data(&profile, "orders", &earliest(50))
        .await;

    let entry = orchestrator.entry("orders").await.unwrap();
    let message = &entry.messages[0];

    // Seeded order payloads are JSON and must pretty-print.
    let json = render_field(message, DataField::Value, DataFormat::Json);
    assert!(!json.plain.starts_with("Failed"));
    assert!(json.plain.contains("\"id\""));

    // The same payload is not XML and degrades to the inline failure text.
    let xml = render_field(message, DataField::Value, DataFormat::Xml);
    assert_eq!(xml.plain, "Failed to format XML: Error parsing data");

    // HEX and TEXT never fail.
    let hex = render_field(message, DataField::Value, DataFormat::Hex);
    assert!(hex.plain.ends_with(' '));
    let text = render_field(message, DataField::Value, DataFormat::Text);
    assert_eq!(text.plain, message.value);
    assert_ne!(text.plain, NO_DATA);
}

#[tokio::test]
async fn produced_message_becomes_visible_on_refetch() {
    let config = AppConfig::with_demo_broker().await;
    let profile = ConnectionProfile::plaintext("demo", "127.0.0.1:9092");
    let orchestrator = &config.orchestrator;

    orchestrator.list_topics(&profile).await;
    orchestrator.select_topic("payments").await;
    orchestrator
        .fetch_topic_data(&profile, "payments", &earliest(50))
        .await;
    let before = orchestrator.entry("payments").await.unwrap().messages.len();

    let record = ProducerRecord {
        topic: "payments".to_string(),
        key: Some("pay-2".to_string()),
        value: "<payment><amount>25</amount></payment>".to_string(),
        headers: vec![MessageHeader::new("source", "integration")],
    };
    record.validate().unwrap();
    orchestrator.produce_message(&profile, record).await;

    // Producing alone leaves the cache untouched.
    assert_eq!(
        orchestrator.entry("payments").await.unwrap().messages.len(),
        before
    );

    orchestrator
        .fetch_topic_data(&profile, "payments", &earliest(50))
        .await;
    let after = orchestrator.entry("payments").await.unwrap();
    assert_eq!(after.messages.len(), before + 1);
    assert!(after.messages.iter().any(|m| m.key == "pay-2"));
}

#[tokio::test]
async fn fetching_an_unknown_topic_reports_the_fixed_error() {
    let config = AppConfig::with_demo_broker().await;
    let profile = ConnectionProfile::plaintext("demo", "127.0.0.1:9092");
    let orchestrator = &config.orchestrator;

    orchestrator.list_topics(&profile).await;
    orchestrator.select_topic("ghost").await;
    orchestrator
        .fetch_topic_data(&profile, "ghost", &earliest(50))
        .await;

    let status = orchestrator.status().await;
    assert!(!status.loading);
    assert_eq!(status.error, Some(FETCH_DATA_FAILED));
    assert!(orchestrator.entry("ghost").await.is_none());
    // Discovered topics are unaffected by the failure.
    assert_eq!(orchestrator.topic_names().await, vec!["orders", "payments"]);
}

#[tokio::test]
async fn topic_config_is_fetched_into_its_entry() {
    let config = AppConfig::with_demo_broker().await;
    let profile = ConnectionProfile::plaintext("demo", "127.0.0.1:9092");
    let orchestrator = &config.orchestrator;

    orchestrator.list_topics(&profile).await;
    orchestrator.select_topic("orders").await;
    orchestrator.fetch_topic_config(&profile, "orders").await;

    let entry = orchestrator.entry("orders").await.unwrap();
    assert_eq!(
        entry.config.get("cleanup.policy"),
        Some(&"delete".to_string())
    );
    assert_eq!(orchestrator.status().await.error, None);
}
