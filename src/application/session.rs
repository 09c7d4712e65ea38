use tokio::sync::RwLock;
use tracing::warn;

use crate::domain::ConnectionProfile;
use crate::ports::outgoing::broker_client::BrokerClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationStatus {
    Unverified,
    /// Broker acknowledgement string.
    Validated(String),
    Failed(String),
}

struct ActiveConnection {
    profile: ConnectionProfile,
    status: ValidationStatus,
}

/// Holds the one active connection profile and its validation status. The
/// design assumes a single active connection at a time; activating another
/// profile replaces the previous one.
#[derive(Default)]
pub struct ConnectionSession {
    inner: RwLock<Option<ActiveConnection>>,
}

impl ConnectionSession {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// Makes `profile` the active connection, not yet validated.
    pub async fn activate(&self, profile: ConnectionProfile) {
        *self.inner.write().await = Some(ActiveConnection {
            profile,
            status: ValidationStatus::Unverified,
        });
    }

    pub async fn active_profile(&self) -> Option<ConnectionProfile> {
        self.inner.read().await.as_ref().map(|a| a.profile.clone())
    }

    pub async fn validation_status(&self) -> ValidationStatus {
        self.inner
            .read()
            .await
            .as_ref()
            .map(|a| a.status.clone())
            .unwrap_or(ValidationStatus::Unverified)
    }

    /// Drives the broker's validation capability for the active profile and
    /// records the outcome. Returns `Unverified` when no profile is active.
    pub async fn validate(&self, broker: &dyn BrokerClient) -> ValidationStatus {
        let profile = match self.active_profile().await {
            Some(p) => p,
            None => return ValidationStatus::Unverified,
        };

        let status = match broker.validate_connection(&profile).await {
            Ok(ack) => ValidationStatus::Validated(ack),
            Err(e) => {
                warn!(connection = %profile.name, error = %e, "connection validation failed");
                ValidationStatus::Failed(e.to_string())
            }
        };

        let mut inner = self.inner.write().await;
        if let Some(active) = inner.as_mut() {
            // Keep the outcome only if the profile was not swapped while
            // validation was in flight.
            if active.profile.id == profile.id {
                active.status = status.clone();
            }
        }
        status
    }
}
