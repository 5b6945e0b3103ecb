//! Provider-token construction, signing, and caching.
//!
//! The gateway accepts a provider JWT for roughly an hour; we refresh at 55
//! minutes so a token is never presented near the edge of that window. The
//! cache is keyed by `(key_id, team_id)` and guarded by a mutex held across
//! the staleness check and the signing: concurrent senders hitting an
//! expired entry serialize on the lock, the first one signs, and the rest
//! find the fresh token already cached. A refresh replaces the cache entry
//! atomically; readers only ever see a complete serialized token.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;

use crate::signer::{Es256Signer, SigningError};

/// Token validity period (55 minutes — refresh before the gateway's
/// 1-hour acceptance window closes).
const TOKEN_VALIDITY: Duration = Duration::from_secs(55 * 60);

/// JWT header segment.
#[derive(Serialize)]
struct TokenHeader<'a> {
    alg: &'static str,
    kid: &'a str,
}

/// JWT claims segment.
#[derive(Serialize)]
struct TokenClaims<'a> {
    iss: &'a str,
    iat: i64,
}

/// A signed token with its issue instant for staleness checks.
struct CachedToken {
    token: String,
    issued_at: Instant,
}

/// Builds, signs, and caches provider tokens.
///
/// The manager exclusively owns the cache; callers receive cloned
/// serialized tokens and never observe intermediate state.
pub struct TokenManager {
    validity: Duration,
    cache: Mutex<HashMap<(String, String), CachedToken>>,
}

impl Default for TokenManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenManager {
    /// Manager with the standard 55-minute validity window.
    #[must_use]
    pub fn new() -> Self {
        Self::with_validity(TOKEN_VALIDITY)
    }

    /// Manager with an explicit validity window.
    #[must_use]
    pub fn with_validity(validity: Duration) -> Self {
        Self {
            validity,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The current serialized token for `(key_id, team_id)`, signing a
    /// fresh one when none is cached or the cached one has aged out.
    pub fn current_token(
        &self,
        signer: &Es256Signer,
        key_id: &str,
        team_id: &str,
    ) -> Result<String, SigningError> {
        let mut cache = self.cache.lock();

        if let Some(cached) = cache.get(&(key_id.to_string(), team_id.to_string())) {
            if cached.issued_at.elapsed() < self.validity {
                return Ok(cached.token.clone());
            }
        }

        let token = sign_token(signer, key_id, team_id)?;
        debug!(key_id, team_id, "signed fresh provider token");
        let _ = cache.insert(
            (key_id.to_string(), team_id.to_string()),
            CachedToken {
                token: token.clone(),
                issued_at: Instant::now(),
            },
        );
        Ok(token)
    }

    #[cfg(test)]
    pub(crate) fn cached_entries(&self) -> usize {
        self.cache.lock().len()
    }
}

/// Produce the three-segment serialized token:
/// `base64url(header).base64url(claims).base64url(signature)`.
fn sign_token(signer: &Es256Signer, key_id: &str, team_id: &str) -> Result<String, SigningError> {
    let header = serde_json::to_vec(&TokenHeader {
        alg: "ES256",
        kid: key_id,
    })
    .map_err(|e| SigningError::Sign {
        reason: e.to_string(),
    })?;
    let claims = serde_json::to_vec(&TokenClaims {
        iss: team_id,
        iat: chrono::Utc::now().timestamp(),
    })
    .map_err(|e| SigningError::Sign {
        reason: e.to_string(),
    })?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header),
        URL_SAFE_NO_PAD.encode(claims)
    );
    let signature = signer.sign(signing_input.as_bytes())?;
    Ok(format!("{signing_input}.{signature}"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::Value;

    use super::*;
    use crate::testing::EC_PRIVATE_KEY_PEM;

    fn signer() -> Es256Signer {
        Es256Signer::from_pem(EC_PRIVATE_KEY_PEM.as_bytes()).unwrap()
    }

    fn decode_segment(segment: &str) -> Value {
        let bytes = URL_SAFE_NO_PAD.decode(segment).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn claims_of(token: &str) -> Value {
        decode_segment(token.split('.').nth(1).unwrap())
    }

    #[test]
    fn token_has_three_well_formed_segments() {
        let manager = TokenManager::new();
        let token = manager.current_token(&signer(), "KEY123", "TEAM456").unwrap();

        let segments: Vec<&str> = token.split('.').collect();
        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|s| !s.is_empty()));

        let header = decode_segment(segments[0]);
        assert_eq!(header["alg"], "ES256");
        assert_eq!(header["kid"], "KEY123");

        let claims = decode_segment(segments[1]);
        assert_eq!(claims["iss"], "TEAM456");
        assert!(claims["iat"].is_i64());
    }

    #[test]
    fn token_is_cached_within_validity_window() {
        let manager = TokenManager::new();
        let signer = signer();
        let first = manager.current_token(&signer, "KEY", "TEAM").unwrap();
        let second = manager.current_token(&signer, "KEY", "TEAM").unwrap();
        assert_eq!(first, second, "cached token must be bit-identical");
        assert_eq!(manager.cached_entries(), 1);
    }

    #[test]
    fn distinct_key_pairs_are_cached_independently() {
        let manager = TokenManager::new();
        let signer = signer();
        let a = manager.current_token(&signer, "KEY_A", "TEAM").unwrap();
        let b = manager.current_token(&signer, "KEY_B", "TEAM").unwrap();
        assert_ne!(a, b);
        assert_eq!(manager.cached_entries(), 2);
    }

    #[test]
    fn expired_token_is_resigned_with_fresher_iat() {
        let manager = TokenManager::with_validity(Duration::ZERO);
        let signer = signer();

        let first = manager.current_token(&signer, "KEY", "TEAM").unwrap();
        // iat has second granularity; cross into the next second so the
        // refreshed claim is strictly greater.
        std::thread::sleep(Duration::from_millis(1100));
        let second = manager.current_token(&signer, "KEY", "TEAM").unwrap();

        let first_iat = claims_of(&first)["iat"].as_i64().unwrap();
        let second_iat = claims_of(&second)["iat"].as_i64().unwrap();
        assert!(second_iat > first_iat);
        assert_eq!(manager.cached_entries(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_refresh_converges_to_one_entry() {
        let manager = Arc::new(TokenManager::with_validity(Duration::ZERO));
        let signer = Arc::new(signer());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let manager = Arc::clone(&manager);
                let signer = Arc::clone(&signer);
                tokio::spawn(async move { manager.current_token(&signer, "KEY", "TEAM") })
            })
            .collect();

        for handle in handles {
            let token = handle.await.unwrap().unwrap();
            let segments: Vec<&str> = token.split('.').collect();
            assert_eq!(segments.len(), 3);
            assert!(segments.iter().all(|s| !s.is_empty()));
        }

        assert_eq!(manager.cached_entries(), 1);
    }
}
