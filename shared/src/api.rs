//! Request and response bodies for each remote endpoint.

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::event::Credentials;
use crate::model::{Genre, GenreId, Movie, MovieId, User};

/// Body of `POST /api/users/login` and `POST /api/users/register`.
#[derive(Serialize)]
pub struct CredentialsBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a Credentials> for CredentialsBody<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            email: &credentials.email,
            password: credentials.password.expose_secret(),
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct LoginResponse {
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GenresResponse {
    pub genres: Vec<Genre>,
}

/// One page of `GET /api/discover/{type}[/{genre}]`.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct CatalogPage {
    #[serde(default)]
    pub results: Vec<CatalogRecord>,
}

/// Raw discovery entry, before projection.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct CatalogRecord {
    pub id: MovieId,
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    /// Present on TV entries instead of `original_title`.
    #[serde(default)]
    pub original_name: Option<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VideoKeyResponse {
    #[serde(default)]
    pub key: Option<String>,
}

/// Body returned by both liked-movie endpoints.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MoviesResponse {
    #[serde(default)]
    pub movies: Vec<Movie>,
}

/// Body of `PUT /api/movies/remove`.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoveLikedMovieRequest {
    pub email: String,
    pub movie_id: MovieId,
}
