//! Service endpoints consumed by the core.
//!
//! The defaults point at the three local development services. A shell can
//! replace them at startup with [`Event::Configure`](crate::Event::Configure).

use serde::{Deserialize, Serialize};

use crate::capabilities::{EndpointError, HttpMethod, ValidatedUrl};
use crate::model::{GenreId, MediaType, MovieId};

pub const DEFAULT_AUTH_URL: &str = "http://127.0.0.1:5001";
pub const DEFAULT_DISCOVERY_URL: &str = "http://127.0.0.1:5003";
pub const DEFAULT_LIKED_MOVIES_URL: &str = "http://127.0.0.1:5002";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub auth_url: String,
    pub discovery_url: String,
    pub liked_movies_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            discovery_url: DEFAULT_DISCOVERY_URL.to_string(),
            liked_movies_url: DEFAULT_LIKED_MOVIES_URL.to_string(),
        }
    }
}

/// A fully resolved remote call target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub url: ValidatedUrl,
}

impl Endpoint {
    fn new(method: HttpMethod, url: ValidatedUrl) -> Self {
        Self { method, url }
    }
}

/// Where a paged catalog fetch reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogSource {
    Discover { media_type: MediaType },
    Genre { media_type: MediaType, genre: GenreId },
}

impl ServiceConfig {
    pub fn login(&self) -> Result<Endpoint, EndpointError> {
        let url = ValidatedUrl::new(&self.auth_url)?.join_segments(["api", "users", "login"])?;
        Ok(Endpoint::new(HttpMethod::Post, url))
    }

    pub fn register(&self) -> Result<Endpoint, EndpointError> {
        let url =
            ValidatedUrl::new(&self.auth_url)?.join_segments(["api", "users", "register"])?;
        Ok(Endpoint::new(HttpMethod::Post, url))
    }

    pub fn genres(&self, media_type: MediaType) -> Result<Endpoint, EndpointError> {
        let url = ValidatedUrl::new(&self.discovery_url)?.join_segments([
            "api",
            "discover",
            media_type.as_str(),
            "genre",
        ])?;
        Ok(Endpoint::new(HttpMethod::Get, url))
    }

    /// `page` is 1-based.
    pub fn catalog_page(
        &self,
        source: CatalogSource,
        page: u32,
    ) -> Result<Endpoint, EndpointError> {
        let base = ValidatedUrl::new(&self.discovery_url)?;
        let url = match source {
            CatalogSource::Discover { media_type } => {
                base.join_segments(["api", "discover", media_type.as_str()])?
            }
            CatalogSource::Genre { media_type, genre } => {
                let genre = genre.to_string();
                base.join_segments(["api", "discover", media_type.as_str(), genre.as_str()])?
            }
        };
        Ok(Endpoint::new(HttpMethod::Get, url.with_page(page)))
    }

    pub fn video_key(&self, movie_id: MovieId) -> Result<Endpoint, EndpointError> {
        let movie_id = movie_id.to_string();
        let url = ValidatedUrl::new(&self.discovery_url)?.join_segments([
            "api",
            "discover",
            "video",
            movie_id.as_str(),
        ])?;
        Ok(Endpoint::new(HttpMethod::Get, url))
    }

    pub fn liked_movies(&self, email: &str) -> Result<Endpoint, EndpointError> {
        let url = ValidatedUrl::new(&self.liked_movies_url)?
            .join_segments(["api", "movies", "liked", email])?;
        Ok(Endpoint::new(HttpMethod::Get, url))
    }

    pub fn remove_liked_movie(&self) -> Result<Endpoint, EndpointError> {
        let url = ValidatedUrl::new(&self.liked_movies_url)?
            .join_segments(["api", "movies", "remove"])?;
        Ok(Endpoint::new(HttpMethod::Put, url))
    }
}
