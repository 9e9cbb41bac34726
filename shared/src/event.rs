use secrecy::SecretString;

use crux_http::Response;

use crate::api::{CatalogPage, GenresResponse, LoginResponse, MoviesResponse, VideoKeyResponse};
use crate::catalog::CatalogFetch;
use crate::config::ServiceConfig;
use crate::model::{GenreId, MediaType, MovieId, User};

/// Login and registration input. The password never shows up in `Debug`.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::new(password.into()),
        }
    }
}

pub type HttpResult<T> = crux_http::Result<Response<T>>;

// --- Event enum: completions carry their HTTP result, boxed to keep the enum small ---

pub enum Event {
    Configure(Box<ServiceConfig>),

    // Auth
    Login(Credentials),
    Register(Credentials),
    Logout,
    ClearError,

    // Catalog
    FetchGenres {
        media_type: MediaType,
    },
    FetchMovies {
        media_type: MediaType,
    },
    FetchByGenre {
        genre: GenreId,
        media_type: MediaType,
    },
    FetchVideoKey {
        movie_id: MovieId,
    },

    // Liked movies
    FetchLikedMovies {
        email: String,
    },
    RemoveLikedMovie {
        movie_id: MovieId,
        email: String,
    },

    // Capability responses
    LoginCompleted(Box<HttpResult<LoginResponse>>),
    RegisterCompleted(Box<HttpResult<User>>),
    GenresFetched(Box<HttpResult<GenresResponse>>),
    CatalogPageFetched {
        fetch: Box<CatalogFetch>,
        result: Box<HttpResult<CatalogPage>>,
    },
    VideoKeyFetched(Box<HttpResult<VideoKeyResponse>>),
    LikedMoviesFetched(Box<HttpResult<MoviesResponse>>),
    LikedMovieRemoved(Box<HttpResult<MoviesResponse>>),
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Configure(_) => "configure",
            Event::Login(_) => "login",
            Event::Register(_) => "register",
            Event::Logout => "logout",
            Event::ClearError => "clear_error",
            Event::FetchGenres { .. } => "fetch_genres",
            Event::FetchMovies { .. } => "fetch_movies",
            Event::FetchByGenre { .. } => "fetch_by_genre",
            Event::FetchVideoKey { .. } => "fetch_video_key",
            Event::FetchLikedMovies { .. } => "fetch_liked_movies",
            Event::RemoveLikedMovie { .. } => "remove_liked_movie",
            Event::LoginCompleted(_) => "login_completed",
            Event::RegisterCompleted(_) => "register_completed",
            Event::GenresFetched(_) => "genres_fetched",
            Event::CatalogPageFetched { .. } => "catalog_page_fetched",
            Event::VideoKeyFetched(_) => "video_key_fetched",
            Event::LikedMoviesFetched(_) => "liked_movies_fetched",
            Event::LikedMovieRemoved(_) => "liked_movie_removed",
        }
    }

    /// True for events raised by the UI rather than by a completed request.
    pub fn is_user_initiated(&self) -> bool {
        !matches!(
            self,
            Event::LoginCompleted(_)
                | Event::RegisterCompleted(_)
                | Event::GenresFetched(_)
                | Event::CatalogPageFetched { .. }
                | Event::VideoKeyFetched(_)
                | Event::LikedMoviesFetched(_)
                | Event::LikedMovieRemoved(_)
        )
    }
}

impl std::fmt::Debug for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
