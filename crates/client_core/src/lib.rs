use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::{RideId, RideTransition, UserId},
    protocol::{
        AssignDriverRequest, CreatedResource, DriverStatusUpdate, DriverSummary, NewUser,
        RideRequest, RideStatusChange, RideSummary,
    },
};
use tracing::{debug, warn};
use url::Url;

pub mod config;
pub mod error;

pub use config::{load_settings, ClientSettings};
pub use error::{ClientError, Operation};

/// Operations exposed by the ride backend.
#[async_trait]
pub trait BikeTaxiApi: Send + Sync {
    async fn create_user(&self, user: &NewUser) -> Result<UserId, ClientError>;
    async fn list_drivers(&self) -> Result<Vec<DriverSummary>, ClientError>;
    async fn update_driver_status(&self, update: &DriverStatusUpdate) -> Result<(), ClientError>;
    async fn request_ride(&self, request: &RideRequest) -> Result<RideId, ClientError>;
    async fn assign_driver(&self, ride_id: &RideId, driver_id: &UserId)
        -> Result<(), ClientError>;
    async fn update_ride_status(
        &self,
        ride_id: &RideId,
        status: RideTransition,
    ) -> Result<(), ClientError>;
    async fn list_rides(&self, rider_id: Option<&UserId>) -> Result<Vec<RideSummary>, ClientError>;
}

#[derive(Debug, Clone)]
pub struct BikeTaxiClient {
    http: Client,
    base_url: Url,
}

impl BikeTaxiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_http_client(base_url, Client::new())
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::HttpClient)?;
        Self::with_http_client(&settings.backend_url, http)
    }

    fn with_http_client(base_url: &str, http: Client) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url).map_err(|err| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "url cannot carry a path".to_string(),
            });
        }
        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    /// Appends `segments` to the base url, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn get(&self, url: Url) -> RequestBuilder {
        self.http.get(url).header(CONTENT_TYPE, "application/json")
    }

    fn post_json<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> RequestBuilder {
        self.http.post(url).json(body)
    }

    async fn send(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<Response, ClientError> {
        debug!(%operation, "sending backend request");
        let response = request.send().await.map_err(|source| {
            warn!(%operation, "backend unreachable: {source}");
            ClientError::Transport { operation, source }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%operation, %status, "backend rejected request");
            return Err(ClientError::Status { operation, status });
        }
        Ok(response)
    }

    async fn send_for_json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send(operation, request).await?;
        response.json().await.map_err(|source| {
            warn!(%operation, "backend body could not be decoded: {source}");
            ClientError::Decode { operation, source }
        })
    }
}

#[async_trait]
impl BikeTaxiApi for BikeTaxiClient {
    async fn create_user(&self, user: &NewUser) -> Result<UserId, ClientError> {
        let url = self.endpoint(&["api", "users"]);
        let created: CreatedResource = self
            .send_for_json(Operation::CreateUser, self.post_json(url, user))
            .await?;
        Ok(UserId(created.id))
    }

    async fn list_drivers(&self) -> Result<Vec<DriverSummary>, ClientError> {
        let url = self.endpoint(&["api", "drivers"]);
        self.send_for_json(Operation::ListDrivers, self.get(url))
            .await
    }

    async fn update_driver_status(&self, update: &DriverStatusUpdate) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "driver", "status"]);
        self.send(Operation::UpdateDriverStatus, self.post_json(url, update))
            .await?;
        Ok(())
    }

    async fn request_ride(&self, request: &RideRequest) -> Result<RideId, ClientError> {
        let url = self.endpoint(&["api", "rides"]);
        let created: CreatedResource = self
            .send_for_json(Operation::RequestRide, self.post_json(url, request))
            .await?;
        Ok(RideId(created.id))
    }

    async fn assign_driver(
        &self,
        ride_id: &RideId,
        driver_id: &UserId,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "rides", ride_id.as_str(), "assign"]);
        let body = AssignDriverRequest {
            driver_id: driver_id.clone(),
        };
        self.send(Operation::AssignDriver, self.post_json(url, &body))
            .await?;
        Ok(())
    }

    async fn update_ride_status(
        &self,
        ride_id: &RideId,
        status: RideTransition,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "rides", ride_id.as_str(), "status"]);
        self.send(
            Operation::UpdateRideStatus,
            self.post_json(url, &RideStatusChange { status }),
        )
        .await?;
        Ok(())
    }

    async fn list_rides(&self, rider_id: Option<&UserId>) -> Result<Vec<RideSummary>, ClientError> {
        let mut url = self.endpoint(&["api", "rides"]);
        url.query_pairs_mut()
            .append_pair("rider_id", rider_id.map(UserId::as_str).unwrap_or(""));
        self.send_for_json(Operation::ListRides, self.get(url)).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
