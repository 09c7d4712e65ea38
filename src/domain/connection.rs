use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityProtocol {
    #[serde(rename = "PLAINTEXT")]
    Plaintext,
    #[serde(rename = "SSL")]
    Ssl,
    #[serde(rename = "SASL_PLAINTEXT")]
    SaslPlaintext,
    #[serde(rename = "SASL_SSL")]
    SaslSsl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaslMechanism {
    #[serde(rename = "PLAIN")]
    Plain,
    #[serde(rename = "GSSAPI")]
    Gssapi,
    #[serde(rename = "SCRAM-SHA-256")]
    ScramSha256,
    #[serde(rename = "SCRAM-SHA-512")]
    ScramSha512,
    #[serde(rename = "OAUTHBEARER")]
    OauthBearer,
    #[serde(rename = "AWS-MSK-IAM")]
    AwsMskIam,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaslCredentials {
    pub mechanism: SaslMechanism,
    pub username: String,
    pub password: String,
}

/// A saved connection profile. Immutable snapshot passed into every broker
/// request; the core never mutates it. Lifecycle (persistence, editing)
/// belongs to the connection registry, outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionProfile {
    pub id: Uuid,
    pub name: String,
    pub bootstrap_servers: String,
    pub group_id: String,
    pub auto_offset_reset: String,
    pub protocol: SecurityProtocol,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sasl: Option<SaslCredentials>,
}

impl ConnectionProfile {
    /// An unauthenticated profile with the client's default consumer group.
    pub fn plaintext(name: impl Into<String>, bootstrap_servers: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            bootstrap_servers: bootstrap_servers.into(),
            group_id: "kafka-trail".to_string(),
            auto_offset_reset: "earliest".to_string(),
            protocol: SecurityProtocol::Plaintext,
            sasl: None,
        }
    }
}
