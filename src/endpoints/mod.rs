//! The remote store's endpoints.
//!
//! The server only ever sees the public ID, the retrieval and deletion
//! tokens, and the ciphertext. The share secret never leaves this machine.

mod delete;
mod expiration;
mod load;
mod store;

pub use delete::delete_secret;
pub use expiration::{Expiration, UnknownExpiration};
pub use load::load_secret;
pub use store::store_secret;

use crate::encoding::DecodeError;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use url::Url;

/// The header used to prove we know the share secret.
pub const RETRIEVAL_TOKEN_HEADER: &str = "X-Retrieval-Token";
/// The header carrying the deletion capability.
pub const DELETION_TOKEN_HEADER: &str = "X-Deletion-Token";

/// A connection to the server holding encrypted secrets.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: Client,
    base_url: Url,
}

impl RemoteStore {
    /// Create a store which talks to `base_url` using a default HTTP client.
    pub fn new(base_url: &str) -> Result<Self, EndpointError> {
        let client = Client::builder()
            .user_agent(crate::DEFAULT_USER_AGENT)
            .build()?;

        RemoteStore::with_client(client, base_url)
    }

    pub fn with_client(
        client: Client,
        base_url: &str,
    ) -> Result<Self, EndpointError> {
        let base_url = parse_base_url(base_url)?;

        Ok(RemoteStore { client, base_url })
    }

    pub fn base_url(&self) -> &Url { &self.base_url }

    fn secrets_url(&self) -> Result<Url, EndpointError> {
        self.base_url.join("api/secret").map_err(EndpointError::from)
    }

    fn secret_url(&self, public_id: &str) -> Result<Url, EndpointError> {
        self.base_url
            .join(&format!("api/secret/{}", public_id))
            .map_err(EndpointError::from)
    }
}

/// Relative paths are resolved against the base URL, so make sure it is
/// treated as a directory.
fn parse_base_url(raw: &str) -> Result<Url, url::ParseError> {
    if raw.ends_with('/') {
        Url::parse(raw)
    } else {
        Url::parse(&format!("{}/", raw))
    }
}

async fn send(request: RequestBuilder) -> Result<Response, EndpointError> {
    let response = request.send().await?;
    let status = response.status();

    log::trace!("{} {}", status, response.url());

    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    log::debug!("Request to {} was rejected with {}", url, status);

    Err(EndpointError::Rejected { url, status, body })
}

/// Typical endpoint errors.
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    /// The HTTP client encountered an error.
    #[error("Unable to send the request")]
    HttpClient(#[from] reqwest::Error),
    #[error("Invalid server URL")]
    BadUrl(#[from] url::ParseError),
    /// The server answered with a non-2xx status code.
    #[error("The server rejected the request to {} with {}", url, status)]
    Rejected {
        url: String,
        status: StatusCode,
        body: String,
    },
    /// The server sent back something we couldn't decode.
    #[error("Unable to decode the \"{}\" field in the response", field)]
    BadResponse {
        field: &'static str,
        #[source]
        inner: DecodeError,
    },
    #[error("A deletion token is required to store a secret")]
    MissingDeletionToken,
}

impl EndpointError {
    /// The HTTP status code, if the server got far enough to send one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            EndpointError::Rejected { status, .. } => Some(*status),
            EndpointError::HttpClient(e) => e.status(),
            _ => None,
        }
    }
}
