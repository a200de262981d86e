pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod notifier;
pub mod payload;
pub mod resolver;

pub use client::{Credential, DeliveryResult, MessageEnvelope, Room, SparkClient};
pub use config::{ApiSettings, NotifierConfig};
pub use error::{NotifyError, Result};
pub use notifier::{NotifyReport, run};
pub use payload::{BuildPayload, BuildStatus};
pub use resolver::{RoomReference, resolve};
