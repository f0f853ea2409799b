use serde::{Deserialize, Serialize};

use super::entity_id::{EntityId, Identified};
use super::{Application, Scope};

/// A grant the signed-in user gave a client application.
///
/// Apart from the id every part is optional: the server omits sides it
/// does not disclose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    pub id: EntityId,
    #[serde(default)]
    pub client_app: Option<Application>,
    #[serde(default)]
    pub server_app: Option<Application>,
    #[serde(default)]
    pub scope: Option<Scope>,
}

impl Identified for Authorization {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Authorization {
    /// Best display label for the client side of the grant.
    pub fn client_name(&self) -> Option<&str> {
        self.client_app.as_ref().map(|app| app.name.as_str())
    }

    pub fn scope_name(&self) -> Option<&str> {
        self.scope.as_ref().map(|scope| scope.name.as_str())
    }
}

/// Payload for granting a client application access on the user's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAuthorization {
    /// Hex-encoded client id of the requesting application.
    pub client_id: String,
    pub scope: String,
    /// Must share origin and path with the application's callback URI.
    pub redirect_uri: String,
    pub response_type: String,
    /// Opaque value echoed back to the client.
    pub state: String,
}

impl NewAuthorization {
    /// Authorization-code grant with the given parameters.
    pub fn code(
        client_id: impl Into<String>,
        scope: impl Into<String>,
        redirect_uri: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            scope: scope.into(),
            redirect_uri: redirect_uri.into(),
            response_type: "code".into(),
            state: state.into(),
        }
    }
}

/// Answer to a granted authorization-code request.
///
/// The code is short-lived and is handed to the client application, which
/// redeems it for a token. `state` echoes the request's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationGrant {
    pub code: String,
    pub state: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_authorization_decodes() {
        let auth: Authorization = serde_json::from_value(json!({
            "id": 12,
            "scope": { "id": 3, "name": "profile:read" }
        }))
        .unwrap();
        assert_eq!(auth.id(), EntityId::new(12));
        assert!(auth.client_app.is_none());
        assert_eq!(auth.scope_name(), Some("profile:read"));
        assert_eq!(auth.client_name(), None);
    }

    #[test]
    fn grant_is_not_an_authorization() {
        let body = json!({ "code": "deadbeef", "state": "xyz" });
        let grant: AuthorizationGrant = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(grant.code, "deadbeef");
        assert!(serde_json::from_value::<Authorization>(body).is_err());
    }

    #[test]
    fn code_grant_sets_response_type() {
        let payload = NewAuthorization::code("ab12", "profile:read", "https://c/cb", "xyz");
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["response_type"], "code");
        assert_eq!(value["state"], "xyz");
    }
}
