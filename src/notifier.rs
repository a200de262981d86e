//! Notification pipeline: resolve the room, post the build status, then the custom message

use tracing::{error, info};

use crate::client::{MessageEnvelope, SparkClient};
use crate::config::NotifierConfig;
use crate::error::{NotifyError, Result};
use crate::resolver::resolve;

/// What a successful run delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyReport {
    pub room_id: String,
    pub messages_sent: usize,
}

/// Runs the whole notification. Every step is awaited in order and the first
/// failure aborts the rest.
pub async fn run(config: &NotifierConfig) -> Result<NotifyReport> {
    let client = SparkClient::new(&config.api, &config.credential)?;

    let room_id = resolve(&client, &config.room).await?;

    info!(
        "Sending {} build status for {} #{}",
        config.build.status, config.build.repo_full_name, config.build.build_number
    );
    deliver(&client, MessageEnvelope::new(&room_id, config.build.compose())).await?;
    let mut messages_sent = 1;

    if let Some(custom) = &config.custom_message {
        info!("Sending custom message");
        deliver(&client, MessageEnvelope::new(&room_id, custom.as_str())).await?;
        messages_sent += 1;
    }

    info!("Sent {} message(s) to room {}", messages_sent, room_id);
    Ok(NotifyReport {
        room_id,
        messages_sent,
    })
}

async fn deliver(client: &SparkClient, envelope: MessageEnvelope) -> Result<()> {
    let result = client.send(&envelope).await?;
    if result.is_delivered() {
        return Ok(());
    }

    let message = result
        .error_message()
        .unwrap_or("no error message returned")
        .to_string();
    error!(
        "Message to room {} rejected: HTTP {}: {}",
        envelope.room_id, result.status, message
    );
    Err(NotifyError::Delivery {
        status: result.status,
        message,
    })
}
