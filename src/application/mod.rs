pub mod error;
pub mod orchestrator;
pub mod session;
pub mod settings;
pub mod topic_cache;

pub use error::{ApplicationError, Result};
pub use orchestrator::{FetchOrchestrator, FetchStatus};
pub use session::{ConnectionSession, ValidationStatus};
pub use settings::{DataField, DataFormat, FetchSettings, OffsetMode};
pub use topic_cache::{TopicCache, TopicCacheEntry};
