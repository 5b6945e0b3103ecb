//! Client orchestration: token → request → transport → interpretation.

use std::time::Duration;

use apns_core::{Delivered, Notification, interpret};
use futures::future::join_all;
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::request::assemble;
use crate::signer::Es256Signer;
use crate::token::TokenManager;
use crate::transport::{ReqwestTransport, Transport};

/// The delivery facade.
///
/// One client serves any number of concurrent sends; the only shared
/// mutable state is the token cache inside [`TokenManager`], and a send's
/// deadline cancels nothing but that send's own wait.
pub struct Client<T: Transport = ReqwestTransport> {
    config: ClientConfig,
    signer: Es256Signer,
    tokens: TokenManager,
    transport: T,
}

impl Client<ReqwestTransport> {
    /// Build a client from configuration: loads the `.p8` signing key and
    /// constructs the HTTP/2 transport for the configured environment.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let signer = Es256Signer::from_pem_file(config.resolved_key_path())?;
        let transport = ReqwestTransport::new(config.gateway_host())?;

        info!(
            key_id = %config.key_id,
            team_id = %config.team_id,
            environment = ?config.environment,
            "APNs client initialized"
        );

        Ok(Self::with_transport(config, signer, transport))
    }
}

impl<T: Transport> Client<T> {
    /// Build a client around an explicit signer and transport.
    #[must_use]
    pub fn with_transport(config: ClientConfig, signer: Es256Signer, transport: T) -> Self {
        Self {
            config,
            signer,
            tokens: TokenManager::new(),
            transport,
        }
    }

    /// Deliver a notification to one device under the configured deadline.
    pub async fn send(
        &self,
        notification: &Notification,
        device_token: &str,
    ) -> Result<Delivered, ClientError> {
        self.send_with_deadline(notification, device_token, self.config.request_timeout())
            .await
    }

    /// Deliver a notification to one device under an explicit deadline.
    ///
    /// The deadline bounds the whole transport exchange; when it elapses
    /// the in-flight request is dropped (cancellation is best-effort) and
    /// the send resolves to [`ClientError::Timeout`]. The token cache is
    /// unaffected.
    pub async fn send_with_deadline(
        &self,
        notification: &Notification,
        device_token: &str,
        deadline: Duration,
    ) -> Result<Delivered, ClientError> {
        let bearer =
            self.tokens
                .current_token(&self.signer, &self.config.key_id, &self.config.team_id)?;
        let request = assemble(notification, device_token, &bearer)?;

        let response = match tokio::time::timeout(
            deadline,
            self.transport.execute(&request, deadline),
        )
        .await
        {
            Ok(result) => result?,
            Err(_elapsed) => {
                warn!(
                    topic = %notification.topic(),
                    push_type = %notification.push_type(),
                    deadline = ?deadline,
                    "send deadline elapsed"
                );
                return Err(ClientError::Timeout);
            }
        };

        match interpret(
            response.status,
            response.apns_id.as_deref(),
            &response.body,
            notification.apns_id(),
        ) {
            Ok(delivered) => {
                info!(
                    topic = %notification.topic(),
                    push_type = %notification.push_type(),
                    status = response.status,
                    apns_id = ?delivered.apns_id,
                    "notification accepted"
                );
                Ok(delivered)
            }
            Err(rejection) => {
                warn!(
                    topic = %notification.topic(),
                    push_type = %notification.push_type(),
                    status = response.status,
                    error = %rejection,
                    "notification rejected"
                );
                Err(rejection.into())
            }
        }
    }

    /// Deliver one notification to many devices concurrently, returning a
    /// result per device in input order.
    pub async fn send_to_many(
        &self,
        device_tokens: &[String],
        notification: &Notification,
    ) -> Vec<Result<Delivered, ClientError>> {
        let sends = device_tokens
            .iter()
            .map(|device_token| self.send(notification, device_token));
        join_all(sends).await
    }
}

#[cfg(test)]
mod tests {
    use apns_core::{Alert, AlertNotification, ErrorReason};
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use uuid::Uuid;

    use super::*;
    use crate::request::AssembledRequest;
    use crate::testing::EC_PRIVATE_KEY_PEM;
    use crate::transport::{RawResponse, TransportError};

    fn client_with<T: Transport>(transport: T) -> Client<T> {
        let config = ClientConfig::new("KEY123", "TEAM456");
        let signer = Es256Signer::from_pem(EC_PRIVATE_KEY_PEM.as_bytes()).unwrap();
        Client::with_transport(config, signer, transport)
    }

    fn alert() -> Notification {
        AlertNotification::new("com.test.app", Alert::new("T", "B")).into()
    }

    /// Accepts everything, optionally echoing an `apns-id`, and records the
    /// last request it saw.
    struct AcceptingTransport {
        echoed_id: Option<String>,
        last_request: Mutex<Option<AssembledRequest>>,
    }

    impl AcceptingTransport {
        fn new(echoed_id: Option<String>) -> Self {
            Self {
                echoed_id,
                last_request: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl Transport for AcceptingTransport {
        async fn execute(
            &self,
            request: &AssembledRequest,
            _deadline: Duration,
        ) -> Result<RawResponse, TransportError> {
            *self.last_request.lock() = Some(request.clone());
            Ok(RawResponse {
                status: 200,
                apns_id: self.echoed_id.clone(),
                body: Vec::new(),
            })
        }
    }

    /// Rejects everything with a fixed status and body.
    struct RejectingTransport {
        status: u16,
        body: &'static [u8],
    }

    #[async_trait]
    impl Transport for RejectingTransport {
        async fn execute(
            &self,
            _request: &AssembledRequest,
            _deadline: Duration,
        ) -> Result<RawResponse, TransportError> {
            Ok(RawResponse {
                status: self.status,
                apns_id: None,
                body: self.body.to_vec(),
            })
        }
    }

    /// Never responds; sends against it only resolve via the deadline.
    struct StalledTransport;

    #[async_trait]
    impl Transport for StalledTransport {
        async fn execute(
            &self,
            _request: &AssembledRequest,
            _deadline: Duration,
        ) -> Result<RawResponse, TransportError> {
            tokio::time::sleep(Duration::from_secs(86_400)).await;
            unreachable!("stalled transport must be cancelled by the deadline")
        }
    }

    /// Fails if the orchestration reaches the transport at all.
    struct UnreachableTransport;

    #[async_trait]
    impl Transport for UnreachableTransport {
        async fn execute(
            &self,
            _request: &AssembledRequest,
            _deadline: Duration,
        ) -> Result<RawResponse, TransportError> {
            panic!("transport must not be reached");
        }
    }

    #[tokio::test]
    async fn send_success_uses_echoed_id() {
        let echoed = Uuid::new_v4();
        let client = client_with(AcceptingTransport::new(Some(echoed.to_string())));
        let delivered = client.send(&alert(), "device-token").await.unwrap();
        assert_eq!(delivered.apns_id, Some(echoed));
    }

    #[tokio::test]
    async fn send_success_falls_back_to_submitted_id() {
        let client = client_with(AcceptingTransport::new(None));
        let submitted = Uuid::new_v4();
        let mut notification = AlertNotification::new("com.test.app", Alert::new("T", "B"));
        notification.apns_id = Some(submitted);
        let delivered = client.send(&notification.into(), "device-token").await.unwrap();
        assert_eq!(delivered.apns_id, Some(submitted));
    }

    #[tokio::test]
    async fn request_carries_bearer_authorization() {
        let transport = AcceptingTransport::new(None);
        let client = client_with(transport);
        let _ = client.send(&alert(), "device-token").await.unwrap();

        let request = client.transport.last_request.lock().take().unwrap();
        let authorization = request
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .to_string();
        assert!(authorization.starts_with("bearer "));
        // Three-segment provider token after the scheme.
        assert_eq!(authorization.trim_start_matches("bearer ").split('.').count(), 3);
    }

    #[tokio::test]
    async fn gateway_rejection_is_classified() {
        let client = client_with(RejectingTransport {
            status: 410,
            body: br#"{"reason":"Unregistered","timestamp":1672680658}"#,
        });
        let error = client.send(&alert(), "device-token").await.unwrap_err();
        assert_matches!(
            error,
            ClientError::Gateway {
                status: 410,
                reason: ErrorReason::Unregistered,
                timestamp: Some(1_672_680_658),
            }
        );
    }

    #[tokio::test]
    async fn non_json_error_body_is_malformed_response() {
        let client = client_with(RejectingTransport {
            status: 502,
            body: b"Bad Gateway",
        });
        let error = client.send(&alert(), "device-token").await.unwrap_err();
        assert_matches!(error, ClientError::MalformedResponse { status: 502, .. });
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_elapsing_yields_timeout() {
        let client = client_with(StalledTransport);
        let error = client
            .send_with_deadline(&alert(), "device-token", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert_matches!(error, ClientError::Timeout);
    }

    #[tokio::test]
    async fn transport_timeout_maps_to_client_timeout() {
        struct TimingOutTransport;

        #[async_trait]
        impl Transport for TimingOutTransport {
            async fn execute(
                &self,
                _request: &AssembledRequest,
                _deadline: Duration,
            ) -> Result<RawResponse, TransportError> {
                Err(TransportError::Timeout)
            }
        }

        let client = client_with(TimingOutTransport);
        let error = client.send(&alert(), "device-token").await.unwrap_err();
        assert_matches!(error, ClientError::Timeout);
    }

    #[tokio::test]
    async fn assembly_failure_never_reaches_the_transport() {
        let client = client_with(UnreachableTransport);
        let error = client.send(&alert(), "").await.unwrap_err();
        assert_matches!(error, ClientError::Assembly(_));
    }

    #[tokio::test]
    async fn send_to_many_returns_result_per_device() {
        let client = client_with(AcceptingTransport::new(None));
        let tokens = vec![
            "device-a".to_string(),
            "device-b".to_string(),
            "device-c".to_string(),
        ];
        let results = client.send_to_many(&tokens, &alert()).await;
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(Result::is_ok));
    }

    #[tokio::test]
    async fn new_with_missing_key_file_fails_with_signing_error() {
        let mut config = ClientConfig::new("KEY", "TEAM");
        config.key_path = Some("/nonexistent/AuthKey_KEY.p8".to_string());
        let result = Client::new(config);
        assert_matches!(
            result.err(),
            Some(ClientError::Signing(crate::signer::SigningError::KeyRead { .. }))
        );
    }
}
