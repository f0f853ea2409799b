// ── Domain model ──
//
// Typed records exchanged with the administration API. Decoding happens
// at the client boundary, so a shape mismatch surfaces as a typed error
// instead of a half-filled record.

pub mod entity_id;

pub mod application;
pub mod authorization;
pub mod scope;
pub mod secret;
pub mod summary;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use oauthdesk_core::model::*` gives you everything.

pub use entity_id::{EntityId, Identified, UserId};

pub use application::{Application, NewApplication};
pub use authorization::{Authorization, AuthorizationGrant, NewAuthorization};
pub use scope::{NewScope, Scope};
pub use secret::{NewSecret, Secret};
pub use summary::{Summary, SummaryQuota};
