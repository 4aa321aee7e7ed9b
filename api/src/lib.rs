//! Typed REST surface of the campus volunteer-service backend.
//!
//! [`CvsApi`] wraps a [`cvs_client::CvsClient`] and hands out one lightweight
//! handle per backend resource. Every call goes through the client pipeline,
//! so credentials, retries and session invalidation behave the same way for
//! all endpoints.
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use cvs_api::CvsApi;
//! use cvs_api::models::LoginRequest;
//!
//! let api = CvsApi::from_config(cvs_client::ClientConfig::default())?;
//! api.auth().login(&LoginRequest::new("alice", "secret")).await?;
//!
//! // Background badge refresh: failures are logged, never surfaced.
//! let unread: Option<u64> = api.notifications().poll_unread_count().await;
//! # let _ = unread;
//! # Ok(())
//! # }
//! ```

#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod endpoints;
pub mod error;
pub mod models;

use cvs_client::BuildError;
use cvs_client::ClientConfig;
use cvs_client::CvsClient;

pub use error::ApiError;
pub use error::ApiResult;

use endpoints::ActivitiesApi;
use endpoints::AuthApi;
use endpoints::CertificatesApi;
use endpoints::CheckApi;
use endpoints::MallApi;
use endpoints::NotificationsApi;
use endpoints::PointsApi;
use endpoints::ReviewsApi;
use endpoints::RolesApi;
use endpoints::ServiceRecordsApi;
use endpoints::SignupsApi;
use endpoints::StatisticsApi;
use endpoints::UsersApi;

/// Entry point of the typed API.
#[derive(Debug, Clone)]
pub struct CvsApi {
    client: CvsClient,
}

impl CvsApi {
    pub fn new(client: CvsClient) -> Self {
        Self { client }
    }

    /// Builds a client with the default collaborators and wraps it.
    pub fn from_config(config: ClientConfig) -> Result<Self, BuildError> {
        CvsClient::from_config(config).map(Self::new)
    }

    /// The underlying client, for requests this crate does not model.
    pub fn client(&self) -> &CvsClient {
        &self.client
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.client)
    }

    pub fn activities(&self) -> ActivitiesApi<'_> {
        ActivitiesApi::new(&self.client)
    }

    pub fn signups(&self) -> SignupsApi<'_> {
        SignupsApi::new(&self.client)
    }

    pub fn check(&self) -> CheckApi<'_> {
        CheckApi::new(&self.client)
    }

    pub fn reviews(&self) -> ReviewsApi<'_> {
        ReviewsApi::new(&self.client)
    }

    pub fn service_records(&self) -> ServiceRecordsApi<'_> {
        ServiceRecordsApi::new(&self.client)
    }

    pub fn points(&self) -> PointsApi<'_> {
        PointsApi::new(&self.client)
    }

    pub fn mall(&self) -> MallApi<'_> {
        MallApi::new(&self.client)
    }

    pub fn certificates(&self) -> CertificatesApi<'_> {
        CertificatesApi::new(&self.client)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(&self.client)
    }

    pub fn roles(&self) -> RolesApi<'_> {
        RolesApi::new(&self.client)
    }

    pub fn notifications(&self) -> NotificationsApi<'_> {
        NotificationsApi::new(&self.client)
    }

    pub fn statistics(&self) -> StatisticsApi<'_> {
        StatisticsApi::new(&self.client)
    }
}
