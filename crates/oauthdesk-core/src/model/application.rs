use serde::{Deserialize, Serialize};

use super::entity_id::{EntityId, Identified};
use crate::error::CoreError;

/// A client application registered by the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: EntityId,
    pub name: String,
    pub website_uri: String,
    pub callback_uri: String,
}

impl Identified for Application {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Payload for registering a new application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewApplication {
    pub name: String,
    pub website_uri: String,
    pub callback_uri: String,
}

impl NewApplication {
    pub fn new(
        name: impl Into<String>,
        website_uri: impl Into<String>,
        callback_uri: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            website_uri: website_uri.into(),
            callback_uri: callback_uri.into(),
        }
    }

    /// Reject blank fields before a request is made.
    ///
    /// The server performs its own validation; this only catches payloads
    /// that can never succeed.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (field, value) in [
            ("name", &self.name),
            ("website_uri", &self.website_uri),
            ("callback_uri", &self.callback_uri),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::ValidationFailed {
                    message: format!("{field} is required"),
                    code: None,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_server_shape() {
        let app: Application = serde_json::from_value(json!({
            "id": 1,
            "name": "A",
            "website_uri": "https://a.example.com",
            "callback_uri": "https://a.example.com/cb",
            "created_at": "2019-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(app.id(), EntityId::new(1));
        assert_eq!(app.name, "A");
    }

    #[test]
    fn missing_required_field_fails_to_decode() {
        let result: Result<Application, _> =
            serde_json::from_value(json!({ "id": 1, "name": "A" }));
        assert!(result.is_err());
    }

    #[test]
    fn blank_fields_fail_validation() {
        let payload = NewApplication::new("B", " ", "https://b.example.com/cb");
        let err = payload.validate().unwrap_err();
        assert!(err.to_string().contains("website_uri"));
        assert!(
            NewApplication::new("B", "https://b.example.com", "https://b.example.com/cb")
                .validate()
                .is_ok()
        );
    }
}
