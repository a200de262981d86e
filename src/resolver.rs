//! Destination room resolution

use tracing::{debug, info, warn};

use crate::client::{Room, SparkClient};
use crate::error::{NotifyError, Result};

const UNRESOLVED: &str = "roomId can't be determined";

/// Where the notification should go, as configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomReference {
    /// Explicit room identifier; must be confirmed by the API
    Id(String),
    /// Room title to look up in the room list
    Name(String),
    Unspecified,
}

impl RoomReference {
    /// An identifier, when given, takes precedence over a name.
    pub fn from_parts(room_id: Option<String>, room_name: Option<String>) -> Self {
        match (room_id, room_name) {
            (Some(id), name) => {
                if name.is_some() {
                    debug!("Both room id and room name configured; using the id");
                }
                RoomReference::Id(id)
            }
            (None, Some(name)) => RoomReference::Name(name),
            (None, None) => RoomReference::Unspecified,
        }
    }
}

/// Finds the first room whose title is exactly `title` (case-sensitive).
pub fn find_room_by_title<'a>(rooms: &'a [Room], title: &str) -> Option<&'a Room> {
    rooms.iter().find(|room| room.title == title)
}

/// Turn the configured reference into one canonical room id.
///
/// An explicit id is only verified; it never falls back to a name lookup.
/// Nothing is requested from the API when no reference is configured.
pub async fn resolve(client: &SparkClient, room: &RoomReference) -> Result<String> {
    match room {
        RoomReference::Id(id) => {
            let valid = client.verify_room(id).await.map_err(lookup_failed)?;
            if valid {
                info!("Using room id {}", id);
                Ok(id.clone())
            } else {
                warn!("Room id {} was not accepted by the API", id);
                Err(NotifyError::Resolution(UNRESOLVED.to_string()))
            }
        }
        RoomReference::Name(name) => {
            let rooms = client.list_rooms().await.map_err(lookup_failed)?;
            match find_room_by_title(&rooms, name) {
                Some(room) => {
                    info!("Room '{}' resolved to {}", name, room.id);
                    Ok(room.id.clone())
                }
                None => {
                    warn!("No room titled '{}' among {} rooms", name, rooms.len());
                    Err(NotifyError::Resolution(UNRESOLVED.to_string()))
                }
            }
        }
        RoomReference::Unspecified => {
            warn!("Neither a room id nor a room name was configured");
            Err(NotifyError::Resolution(UNRESOLVED.to_string()))
        }
    }
}

fn lookup_failed(e: NotifyError) -> NotifyError {
    NotifyError::Resolution(format!("{}: {}", UNRESOLVED, e))
}
