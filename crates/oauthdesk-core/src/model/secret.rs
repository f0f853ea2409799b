use serde::{Deserialize, Serialize};

use super::entity_id::{EntityId, Identified};

/// A client credential pair issued for an application.
///
/// `client_secret` is only present when the server chooses to reveal it
/// (typically right after creation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    pub id: EntityId,
    pub client_id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
}

impl Identified for Secret {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Payload for issuing a new secret. The server generates both halves,
/// so the body is an empty JSON object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NewSecret {}
