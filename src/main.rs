use kafka_trail::adapters::format::render_field;
use kafka_trail::application::settings::{FetchSettings, OffsetMode};
use kafka_trail::config::AppConfig;
use kafka_trail::domain::ConnectionProfile;
use kafka_trail::Result;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::with_demo_broker().await;
    let profile = ConnectionProfile::plaintext("demo", "127.0.0.1:9092");

    config.session.activate(profile.clone()).await;
    let status = config.session.validate(config.broker.as_ref()).await;
    tracing::info!(?status, "session ready");

    let orchestrator = &config.orchestrator;
    orchestrator.list_topics(&profile).await;
    let topics = orchestrator.topic_names().await;
    tracing::info!(topics = topics.len(), "topics discovered");

    let mut settings = FetchSettings::default();
    settings.set_offset_mode(OffsetMode::Earliest);
    settings.set_message_count(10);

    for topic in &topics {
        orchestrator.select_topic(topic).await;
        orchestrator.fetch_topic_data(&profile, topic, &settings).await;
        orchestrator.fetch_topic_config(&profile, topic).await;

        if let Some(err) = orchestrator.status().await.error {
            tracing::error!(topic = %topic, error = err, "browse failed");
            continue;
        }

        let Some(entry) = orchestrator.entry(topic).await else {
            continue;
        };
        if let Some(meta) = &entry.metadata {
            println!(
                "{topic}: {} messages across {} partitions",
                meta.message_count, meta.partition_count
            );
        }
        for message in &entry.messages {
            let rendered = render_field(message, settings.data_field, settings.data_format);
            println!(
                "  [{}/{}] {}",
                message.partition, message.offset, rendered.highlighted
            );
        }
    }

    Ok(())
}
