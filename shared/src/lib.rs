//! Shared core of the movie browser.
//!
//! The core owns one [`Model`] (movies, genres, the signed-in user, the
//! selected trailer key and the last error). Shells drive it with
//! [`Event`]s, perform the HTTP effects it requests against the auth,
//! discovery and liked-movie services, and re-read [`ViewModel`] whenever a
//! render is requested.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::too_many_lines)]

pub mod api;
pub mod app;
pub mod capabilities;
pub mod catalog;
pub mod config;
pub mod event;
pub mod model;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use config::ServiceConfig;
pub use crux_core::{render::Render, App as CruxApp};
pub use event::{Credentials, Event};
pub use model::{Genre, GenreId, MediaType, Model, Movie, MovieId, Outcome, User};

/// Catalog fetches stop once this many qualifying records are collected.
pub const MAX_CATALOG_MOVIES: usize = 60;
/// Upper bound on page requests per catalog fetch.
pub const MAX_CATALOG_PAGES: u32 = 9;
pub const MAX_GENRES_PER_MOVIE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Login,
    Register,
    FetchGenres,
    FetchMovies,
    FetchByGenre,
    FetchVideoKey,
    FetchLikedMovies,
    RemoveLikedMovie,
}

impl Operation {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::FetchGenres => "fetch_genres",
            Self::FetchMovies => "fetch_movies",
            Self::FetchByGenre => "fetch_by_genre",
            Self::FetchVideoKey => "fetch_video_key",
            Self::FetchLikedMovies => "fetch_liked_movies",
            Self::RemoveLikedMovie => "remove_liked_movie",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The request could not be built (bad endpoint configuration or body).
    InvalidRequest,
    /// Transport or status failure reported by the shell.
    Remote,
    /// The service answered without a body.
    EmptyResponse,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::Remote => "REMOTE_ERROR",
            Self::EmptyResponse => "EMPTY_RESPONSE",
        }
    }
}

/// Failure of one remote operation, as stored in [`Model::error`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppError {
    pub kind: ErrorKind,
    pub operation: Operation,
    /// Human-readable failure message.
    pub message: String,
}

impl AppError {
    #[must_use]
    pub fn new(kind: ErrorKind, operation: Operation, message: impl Into<String>) -> Self {
        Self {
            kind,
            operation,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid_request(operation: Operation, error: &capabilities::EndpointError) -> Self {
        Self::new(ErrorKind::InvalidRequest, operation, error.to_string())
    }

    #[must_use]
    pub fn remote(operation: Operation, error: &impl fmt::Display) -> Self {
        Self::new(ErrorKind::Remote, operation, error.to_string())
    }

    #[must_use]
    pub fn empty_response(operation: Operation) -> Self {
        Self::new(
            ErrorKind::EmptyResponse,
            operation,
            format!("{operation} returned an empty response"),
        )
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code(), self.operation, self.message)
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ViewModel {
    pub movies: Vec<Movie>,
    pub genres: Vec<Genre>,
    pub genres_loaded: bool,
    pub user: Option<User>,
    pub video_key: Option<String>,
    pub error: Option<String>,
    pub error_code: Option<String>,
    pub is_authenticated: bool,
}

impl From<&Model> for ViewModel {
    fn from(model: &Model) -> Self {
        Self {
            movies: model.movies.clone(),
            genres: model.genres.clone(),
            genres_loaded: model.genres_loaded,
            user: model.user.clone(),
            video_key: model.video_key.clone(),
            error: model.error.as_ref().map(|e| e.message.clone()),
            error_code: model.error.as_ref().map(|e| e.code().to_string()),
            is_authenticated: model.is_authenticated(),
        }
    }
}
