use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

/// Why a connection attempt was refused.
///
/// Variants carry error classifications only; token and key material must
/// never appear in messages or logs.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no verification key is configured")]
    MissingKey,
    #[error("no token was supplied")]
    MissingToken,
    #[error("verification key could not be parsed")]
    InvalidKey(#[source] jsonwebtoken::errors::Error),
    #[error("token verification failed: {kind}")]
    VerificationFailed { kind: String },
}

/// Claims carried by a relay access token. Expiry is enforced by the
/// validation rules; only the subject is read out.
#[derive(Debug, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
}

/// An authenticated connection identity.
///
/// The subject is an opaque correlation handle for logging; nothing else
/// from the token is retained.
#[derive(Debug, Clone)]
pub struct Identity {
    pub subject: Option<String>,
}

/// Verifies client tokens against the configured public key.
///
/// Built once at startup and shared by every connection. With no key
/// configured the gate stays constructible but refuses every attempt.
pub struct CredentialGate {
    key: Option<DecodingKey>,
    validation: Validation,
}

impl CredentialGate {
    /// Build a gate from an RS256 public key in PEM form. Environment-
    /// supplied keys use `\n` escapes for line breaks; those are unescaped
    /// before parsing. `None` disables all access.
    pub fn new(public_key_pem: Option<&str>) -> Result<Self, AuthError> {
        let key = match public_key_pem {
            Some(pem) => {
                let pem = pem.replace("\\n", "\n");
                Some(DecodingKey::from_rsa_pem(pem.as_bytes()).map_err(AuthError::InvalidKey)?)
            }
            None => None,
        };

        Ok(Self {
            key,
            validation: Validation::new(Algorithm::RS256),
        })
    }

    /// Verify a bearer token.
    ///
    /// On success the connection may allocate session resources; on failure
    /// it must be refused before any are created.
    pub fn authenticate(&self, token: Option<&str>) -> Result<Identity, AuthError> {
        let key = self.key.as_ref().ok_or(AuthError::MissingKey)?;

        let token = match token {
            Some(token) if !token.is_empty() => token,
            _ => return Err(AuthError::MissingToken),
        };

        let data = jsonwebtoken::decode::<Claims>(token, key, &self.validation).map_err(|e| {
            AuthError::VerificationFailed {
                kind: format!("{:?}", e.kind()),
            }
        })?;

        Ok(Identity {
            subject: data.claims.sub,
        })
    }

    /// Whether a verification key is configured.
    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }
}
