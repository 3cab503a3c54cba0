// Transport collaborator seam.
//
// Sending bytes to the CRS lives behind these traits. The connector opens one
// session per call, injects its header, and performs exactly one call on it.
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::ConfigError;
use crate::exchange_log::Exchange;

pub const HTNG_HEADER_NAMESPACE: &str = "http://htng.org/1.1/Header/";

/// Request/response type pair a session is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageContract {
    pub operation: &'static str,
    pub request_type: &'static str,
    pub response_type: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub contract: MessageContract,
    pub timeout: Option<Duration>,
    /// Keep the raw payloads so they can be handed to an exchange log.
    pub trace: bool,
}

/// A header element to send with the next call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapHeader {
    pub namespace: &'static str,
    pub name: &'static str,
    /// Complete XML of the header element.
    pub content: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportFault {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Remote fault {code}: {message}")]
    Fault { code: String, message: String },

    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    #[error("Malformed reply: {0}")]
    MalformedReply(String),
}

#[async_trait]
pub trait Transport: Send + Sync + 'static {
    type Session: TransportSession;

    // Fails with a ConfigError when the endpoint or options are unusable;
    // nothing has been sent at that point.
    async fn open_session(
        &self,
        endpoint: &str,
        options: SessionOptions,
    ) -> Result<Self::Session, ConfigError>;
}

#[async_trait]
pub trait TransportSession: Send {
    fn set_header(&mut self, header: SoapHeader);

    /// Performs one remote call with the given message body and returns the raw reply.
    async fn call(&mut self, operation: &str, body: String) -> Result<String, TransportFault>;

    /// Raw payloads of the last call, when the session was opened with `trace`.
    fn last_exchange(&self) -> Option<Exchange> {
        None
    }
}
