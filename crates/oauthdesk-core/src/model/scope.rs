use serde::{Deserialize, Serialize};

use super::entity_id::{EntityId, Identified};

/// A permission scope an application exposes to its clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Identified for Scope {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Payload for declaring a new scope on an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewScope {
    pub name: String,
    pub description: String,
}

impl NewScope {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}
