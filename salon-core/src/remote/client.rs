//! HTTP client for the booking API

use serde::de::DeserializeOwned;

use crate::config::SalonConfig;
use crate::error::{BookingError, BookingResult};
use crate::model::{ResourceServices, ServiceSchedule};
use crate::remote::ScheduleSource;
use crate::week::IsoWeek;

/// HTTP client for the booking API
#[derive(Clone)]
pub struct BookingApi {
    http: reqwest::Client,
    base_url: String,
}

impl BookingApi {
    pub fn new(base_url: &str) -> Self {
        BookingApi {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &SalonConfig) -> BookingResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|source| BookingError::Http {
            url: config.base_url.clone(),
            source,
        })?;

        Ok(BookingApi {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn services_url(&self, resource_key: &str) -> String {
        format!("{}/services/{}", self.base_url, resource_key)
    }

    pub fn schedule_url(&self, service_id: u32, resource_key: &str, week: IsoWeek) -> String {
        format!(
            "{}/slots/service/{}/resource/{}/{}/",
            self.base_url, service_id, resource_key, week
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> BookingResult<T> {
        tracing::debug!(%url, "GET");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| BookingError::Http {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "booking API error");
            return Err(BookingError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(|source| BookingError::Http {
            url: url.clone(),
            source,
        })?;

        serde_json::from_str(&body).map_err(|source| {
            tracing::warn!(%url, error = %source, "malformed booking API response");
            BookingError::Decode { url, source }
        })
    }
}

impl ScheduleSource for BookingApi {
    async fn fetch_resource_services(&self, resource_key: &str) -> BookingResult<ResourceServices> {
        self.get_json(self.services_url(resource_key)).await
    }

    async fn fetch_service_schedule(
        &self,
        service_id: u32,
        resource_key: &str,
        week: IsoWeek,
    ) -> BookingResult<ServiceSchedule> {
        self.get_json(self.schedule_url(service_id, resource_key, week))
            .await
    }
}
