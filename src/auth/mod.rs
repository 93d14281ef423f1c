//! Credential gate
//!
//! Verifies client bearer tokens before any session resources are
//! allocated. Tokens are RS256 JWTs checked against a configured public
//! key; rejections carry an error classification only, never token or key
//! material.

mod gate;

pub use gate::{AuthError, Claims, CredentialGate, Identity};
