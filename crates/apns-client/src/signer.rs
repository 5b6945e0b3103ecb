//! ES256 signing of provider-token material.
//!
//! Wraps the `.p8` elliptic-curve key Apple issues per developer team and
//! produces the detached signature segment of the provider JWT. ES256 is
//! ECDSA over P-256 with SHA-256; the digesting happens inside the signing
//! primitive.

use std::path::Path;

use jsonwebtoken::{Algorithm, EncodingKey};

/// Errors loading key material or producing a signature.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    /// Failed to read the private key file.
    #[error("failed to read signing key at {path}: {reason}")]
    KeyRead {
        /// Key file path.
        path: String,
        /// Error description.
        reason: String,
    },
    /// Failed to parse the private key.
    #[error("failed to parse signing key: {reason}")]
    KeyParse {
        /// Error description.
        reason: String,
    },
    /// The signing primitive rejected the operation.
    #[error("failed to sign token: {reason}")]
    Sign {
        /// Error description.
        reason: String,
    },
}

/// An ES256 signer over a loaded private key.
pub struct Es256Signer {
    key: EncodingKey,
}

impl std::fmt::Debug for Es256Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Es256Signer").finish_non_exhaustive()
    }
}

impl Es256Signer {
    /// Load a signer from PEM bytes (SEC1 or PKCS#8).
    pub fn from_pem(pem: &[u8]) -> Result<Self, SigningError> {
        let key = EncodingKey::from_ec_pem(pem).map_err(|e| SigningError::KeyParse {
            reason: e.to_string(),
        })?;
        Ok(Self { key })
    }

    /// Load a signer from a `.p8` key file on disk.
    pub fn from_pem_file(path: impl AsRef<Path>) -> Result<Self, SigningError> {
        let path = path.as_ref();
        let pem = std::fs::read(path).map_err(|e| SigningError::KeyRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_pem(&pem)
    }

    /// Sign a message, returning the base64url (no padding) signature
    /// segment. Pure function of the message and the key material.
    pub fn sign(&self, message: &[u8]) -> Result<String, SigningError> {
        jsonwebtoken::crypto::sign(message, &self.key, Algorithm::ES256).map_err(|e| {
            SigningError::Sign {
                reason: e.to_string(),
            }
        })
    }
}
