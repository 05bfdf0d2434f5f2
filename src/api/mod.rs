//! Async client for the platform's admin REST API.
//!
//! Every call attaches `Authorization: Bearer <token>` and parses the
//! `{ success, message, data }` envelope. Two failure kinds are kept apart:
//!
//! - transport or parse failures come back as `Err(PeerdeskError)`;
//! - application refusals (`success: false`) come back as `Ok` values,
//!   an empty [`Page`] for listings or an [`ActionOutcome`] for mutations.
//!
//! Non-2xx statuses carrying a JSON envelope are application responses,
//! so the body is read regardless of the HTTP status.

use std::sync::Arc;
use std::time::Duration;

use reqwest::RequestBuilder;
use reqwest::header::ACCEPT;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;
use zeroize::Zeroizing;

use crate::config::ApiConfig;
use crate::error::PeerdeskError;
use crate::models::{
    ActionOutcome, AdminStats, Bid, BidStatus, Envelope, Page, PaymentDecision, Peer, PeerStatus,
};
use crate::{Result, tls};

/// Per-request timeout; a hung request would otherwise hold its busy flag forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where a page of peers comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    /// First page of a status filter: `GET peers/{status}`.
    First(PeerStatus),
    /// A pagination link exactly as the server returned it.
    Link(String),
}

/// Authenticated handle on the admin API. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Arc<Zeroizing<String>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

impl ApiClient {
    /// Builds a client from configuration, pinning CA roots when configured.
    ///
    /// # Errors
    ///
    /// Returns [`PeerdeskError::Tls`] if the CA bundle is unusable or the
    /// HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("peerdesk/", env!("CARGO_PKG_VERSION")));
        if let Some(path) = &config.ca_cert {
            builder = builder.use_preconfigured_tls(tls::build_tls_config(path)?);
        }
        let http = builder
            .build()
            .map_err(|e| PeerdeskError::Tls(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_http(http, config.base_url.clone(), config.token.as_str()))
    }

    /// Wraps an existing [`reqwest::Client`].
    ///
    /// `base_url` should end in `/`; see [`crate::config::parse_base_url`].
    pub fn with_http(http: reqwest::Client, base_url: Url, token: &str) -> Self {
        Self {
            http,
            base_url,
            token: Arc::new(Zeroizing::new(token.to_string())),
        }
    }

    /// The base URL all paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET bids/{status}?page={n}`.
    ///
    /// A refused or empty envelope yields an empty page.
    pub async fn bids_by_status(&self, status: BidStatus, page: u32) -> Result<Page<Bid>> {
        let mut url = self.endpoint(&format!("bids/{status}"))?;
        url.query_pairs_mut()
            .append_pair("page", &page.max(1).to_string());

        let envelope: Envelope<Page<Bid>> = self.send(self.http.get(url)).await?;
        Ok(envelope.into_data().unwrap_or_default())
    }

    /// `GET bid-details/{id}`. `None` when the server has no such bid.
    pub async fn bid_detail(&self, id: u64) -> Result<Option<Bid>> {
        let url = self.endpoint(&format!("bid-details/{id}"))?;
        let envelope: Envelope<Bid> = self.send(self.http.get(url)).await?;
        Ok(envelope.into_data())
    }

    /// `GET cancel-bid/{id}`.
    pub async fn cancel_bid(&self, id: u64) -> Result<ActionOutcome> {
        let url = self.endpoint(&format!("cancel-bid/{id}"))?;
        let outcome: ActionOutcome = self.send(self.http.get(url)).await?;
        log_outcome("cancel-bid", id, &outcome);
        Ok(outcome)
    }

    /// `GET peers/{status}` or a server pagination link.
    ///
    /// Links must share the base URL's origin so the token never leaves it.
    pub async fn peers(&self, source: &PageSource) -> Result<Page<Peer>> {
        let url = match source {
            PageSource::First(status) => self.endpoint(&format!("peers/{status}"))?,
            PageSource::Link(link) => self.same_origin(link)?,
        };
        let envelope: Envelope<Page<Peer>> = self.send(self.http.get(url)).await?;
        Ok(envelope.into_data().unwrap_or_default())
    }

    /// `POST approve-payment/{peer_id}` with an approve or decline body.
    pub async fn decide_payment(
        &self,
        peer_id: u64,
        decision: &PaymentDecision,
    ) -> Result<ActionOutcome> {
        let url = self.endpoint(&format!("approve-payment/{peer_id}"))?;
        let outcome: ActionOutcome = self.send_json(self.http.post(url), decision).await?;
        log_outcome("approve-payment", peer_id, &outcome);
        Ok(outcome)
    }

    /// `GET unpair-peering/{peer_id}`.
    pub async fn unpair(&self, peer_id: u64) -> Result<ActionOutcome> {
        let url = self.endpoint(&format!("unpair-peering/{peer_id}"))?;
        let outcome: ActionOutcome = self.send(self.http.get(url)).await?;
        log_outcome("unpair-peering", peer_id, &outcome);
        Ok(outcome)
    }

    /// `GET user-status-update/{user_id}/blocked`.
    pub async fn block_user(&self, user_id: u64) -> Result<ActionOutcome> {
        let url = self.endpoint(&format!("user-status-update/{user_id}/blocked"))?;
        let outcome: ActionOutcome = self.send(self.http.get(url)).await?;
        log_outcome("user-status-update", user_id, &outcome);
        Ok(outcome)
    }

    /// `GET {path}` returning the administrator statistics snapshot.
    pub async fn admin_stats(&self, path: &str) -> Result<Option<AdminStats>> {
        let url = self.endpoint(path)?;
        let envelope: Envelope<AdminStats> = self.send(self.http.get(url)).await?;
        Ok(envelope.into_data())
    }

    /// Resolves a relative path against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Parses a server-supplied link, refusing any other origin.
    fn same_origin(&self, link: &str) -> Result<Url> {
        let url = self.base_url.join(link)?;
        if url.origin() != self.base_url.origin() {
            return Err(PeerdeskError::ForeignLink(link.to_string()));
        }
        Ok(url)
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        body: &B,
    ) -> Result<T> {
        self.send(request.json(body)).await
    }

    /// Sends an authenticated request and parses the JSON body.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .bearer_auth(self.token.as_str())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let url = response.url().clone();
        debug!(%url, %status, "admin api response");

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(%url, %status, error = %e, "unexpected response body");
            PeerdeskError::Json(e)
        })
    }
}

fn log_outcome(endpoint: &str, id: u64, outcome: &ActionOutcome) {
    if outcome.success {
        info!(endpoint, id, message = ?outcome.message, "mutation accepted");
    } else {
        warn!(endpoint, id, message = ?outcome.message, "mutation refused");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        let base_url = crate::config::parse_base_url(base).unwrap();
        ApiClient::with_http(reqwest::Client::new(), base_url, "t")
    }

    #[test]
    fn endpoints_keep_base_path() {
        let api = client("https://admin.example.com/api");
        assert_eq!(
            api.endpoint("bids/pending").unwrap().as_str(),
            "https://admin.example.com/api/bids/pending"
        );
        assert_eq!(
            api.endpoint("/admin-stats").unwrap().as_str(),
            "https://admin.example.com/api/admin-stats"
        );
    }

    #[test]
    fn pagination_links_must_share_origin() {
        let api = client("https://admin.example.com/api/");
        let url = api
            .same_origin("https://admin.example.com/api/peers/awaiting_payment?page=2")
            .unwrap();
        assert_eq!(url.query(), Some("page=2"));

        let err = api
            .same_origin("https://evil.example.net/api/peers/awaiting_payment?page=2")
            .unwrap_err();
        assert!(matches!(err, PeerdeskError::ForeignLink(_)));

        let err = api
            .same_origin("http://admin.example.com/api/peers/awaiting_payment?page=2")
            .unwrap_err();
        assert!(matches!(err, PeerdeskError::ForeignLink(_)));
    }

    #[test]
    fn debug_output_redacts_token() {
        let api = client("https://admin.example.com/");
        let rendered = format!("{api:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("\"t\""));
    }
}
