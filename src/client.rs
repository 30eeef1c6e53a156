// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favorites API client with a local mirror.
//!
//! Every successful mutation is followed by a full list fetch whose result
//! replaces the mirror. Mirror writes are best-effort and never fail a call.

use crate::mirror::LocalMirror;
use crate::models::FavoriteSummary;
use crate::services::WeatherReport;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Client-side errors, mirroring the server's error taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Not signed in or session expired")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Error body produced by the API.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    details: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CityBody<'a> {
    city_name: &'a str,
}

/// Client for the favorites and weather API.
pub struct FavoritesClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    mirror: LocalMirror,
}

impl FavoritesClient {
    /// Create a client for the API at `base_url` using a session token.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        mirror: LocalMirror,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            mirror,
        })
    }

    pub fn mirror(&self) -> &LocalMirror {
        &self.mirror
    }

    /// Cached favorites, available without a network call.
    pub fn cached_favorites(&self) -> &[FavoriteSummary] {
        self.mirror.favorites()
    }

    /// City to load on start, from the mirror only.
    pub fn startup_city(&self) -> Option<&str> {
        self.mirror.startup_city()
    }

    /// Fetch the server's list and replace the mirror with it.
    pub async fn refresh(&mut self) -> Result<&[FavoriteSummary], ClientError> {
        let response = self
            .http
            .get(self.url("/api/favorites"))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let favorites: Vec<FavoriteSummary> = check_response(response).await?.json().await?;

        self.mirror.replace_favorites(favorites);
        self.persist().await;
        Ok(self.mirror.favorites())
    }

    /// Add a favorite, then resync the mirror.
    pub async fn add(&mut self, city_name: &str) -> Result<FavoriteSummary, ClientError> {
        let response = self
            .http
            .post(self.url("/api/favorites"))
            .bearer_auth(&self.token)
            .json(&CityBody { city_name })
            .send()
            .await?;

        let favorite: FavoriteSummary = check_response(response).await?.json().await?;

        self.refresh().await?;
        Ok(favorite)
    }

    /// Remove a favorite, then resync the mirror.
    pub async fn remove(&mut self, city_name: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url("/api/favorites"))
            .bearer_auth(&self.token)
            .json(&CityBody { city_name })
            .send()
            .await?;

        check_response(response).await?;

        self.refresh().await?;
        Ok(())
    }

    /// Look up current weather and remember the city as last viewed.
    pub async fn weather(&mut self, city_name: &str) -> Result<WeatherReport, ClientError> {
        let response = self
            .http
            .get(self.url("/api/weather"))
            .query(&[("city", city_name)])
            .send()
            .await?;

        let report: WeatherReport = check_response(response).await?.json().await?;

        self.mirror.set_last_viewed(report.name.clone());
        self.persist().await;
        Ok(report)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn persist(&self) {
        if let Err(e) = self.mirror.save().await {
            tracing::warn!(
                path = %self.mirror.path().display(),
                error = %e,
                "Failed to write favorites mirror"
            );
        }
    }
}

/// Map non-success statuses onto [`ClientError`].
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let body: ApiErrorBody = serde_json::from_str(&text).unwrap_or_default();
    let message = body.details.unwrap_or_else(|| {
        if body.error.is_empty() {
            text.clone()
        } else {
            body.error.clone()
        }
    });

    Err(match status.as_u16() {
        401 => ClientError::Unauthorized,
        404 if body.error == "city_not_found" => ClientError::CityNotFound(message),
        404 => ClientError::NotFound(message),
        400 => ClientError::Validation(message),
        code => ClientError::Server {
            status: code,
            message,
        },
    })
}
