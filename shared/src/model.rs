use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ServiceConfig;
use crate::AppError;

// --- Typed IDs ---

macro_rules! typed_id {
    ($name:ident) => {
        #[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

typed_id!(MovieId);
typed_id!(GenreId);

/// The `{type}` segment of discovery endpoints.
#[derive(Default, Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// Display-ready catalog entry.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Movie {
    pub id: MovieId,
    pub name: String,
    /// Backdrop image path as returned by the discovery service.
    pub image: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Auth service payload, kept verbatim.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(transparent)]
pub struct User(pub serde_json::Value);

/// The shared application record. Only [`Model::apply`] changes the
/// catalog, auth and error fields.
#[derive(Clone, Debug, Default)]
pub struct Model {
    pub movies: Vec<Movie>,
    pub genres: Vec<Genre>,
    pub genres_loaded: bool,
    pub user: Option<User>,
    pub video_key: Option<String>,
    pub error: Option<AppError>,
    pub config: ServiceConfig,
}

/// Result of one remote operation, or a local state action.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// `None` when the login response carried no `user` field.
    LoggedIn(Option<User>),
    Registered(User),
    GenresLoaded(Vec<Genre>),
    MoviesLoaded(Vec<Movie>),
    VideoKeyLoaded(Option<String>),
    LikedMoviesLoaded(Vec<Movie>),
    LikedMovieRemoved(Vec<Movie>),
    Failed(AppError),
    LoggedOut,
    ErrorCleared,
}

impl Model {
    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::LoggedIn(user) => {
                self.user = user;
                self.error = None;
            }
            Outcome::Registered(user) => {
                self.user = Some(user);
                self.error = None;
            }
            Outcome::GenresLoaded(genres) => {
                self.genres = genres;
                self.genres_loaded = true;
            }
            Outcome::MoviesLoaded(movies)
            | Outcome::LikedMoviesLoaded(movies)
            | Outcome::LikedMovieRemoved(movies) => {
                self.movies = movies;
            }
            Outcome::VideoKeyLoaded(key) => {
                self.video_key = Some(key.unwrap_or_default());
            }
            Outcome::Failed(error) => {
                self.error = Some(error);
            }
            Outcome::LoggedOut => {
                self.user = None;
            }
            Outcome::ErrorCleared => {
                self.error = None;
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Pure form of [`Model::apply`].
#[must_use]
pub fn reduce(model: &Model, outcome: Outcome) -> Model {
    let mut next = model.clone();
    next.apply(outcome);
    next
}
