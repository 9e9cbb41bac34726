use serde::Serialize;
use tracing::{debug, info, warn};

use crux_http::RequestBuilder;

use crate::api::{
    CatalogPage, CredentialsBody, GenresResponse, LoginResponse, MoviesResponse,
    RemoveLikedMovieRequest, VideoKeyResponse,
};
use crate::capabilities::{Capabilities, EndpointError, HttpMethod};
use crate::catalog::CatalogFetch;
use crate::config::{CatalogSource, Endpoint};
use crate::event::{Credentials, Event, HttpResult};
use crate::model::{MediaType, Model, MovieId, Outcome, User};
use crate::{AppError, AppResult, ErrorKind, Operation, ViewModel};

#[derive(Default)]
pub struct App;

impl App {
    fn request(endpoint: &Endpoint, caps: &Capabilities) -> RequestBuilder<Event> {
        debug!(
            method = endpoint.method.as_str(),
            url = %endpoint.url,
            "sending request"
        );
        match endpoint.method {
            HttpMethod::Get => caps.http.get(endpoint.url.as_str()),
            HttpMethod::Post => caps.http.post(endpoint.url.as_str()),
            HttpMethod::Put => caps.http.put(endpoint.url.as_str()),
        }
    }

    fn json_request<T: Serialize>(
        operation: Operation,
        endpoint: Result<Endpoint, EndpointError>,
        body: &T,
        caps: &Capabilities,
    ) -> AppResult<RequestBuilder<Event>> {
        let endpoint = endpoint.map_err(|e| AppError::invalid_request(operation, &e))?;
        Self::request(&endpoint, caps)
            .body_json(body)
            .map_err(|e| AppError::new(ErrorKind::InvalidRequest, operation, e.to_string()))
    }

    fn get_request(
        operation: Operation,
        endpoint: Result<Endpoint, EndpointError>,
        caps: &Capabilities,
    ) -> AppResult<RequestBuilder<Event>> {
        let endpoint = endpoint.map_err(|e| AppError::invalid_request(operation, &e))?;
        Ok(Self::request(&endpoint, caps))
    }

    fn send_login(credentials: &Credentials, model: &Model, caps: &Capabilities) -> AppResult<()> {
        let body = CredentialsBody::from(credentials);
        Self::json_request(Operation::Login, model.config.login(), &body, caps)?
            .expect_json::<LoginResponse>()
            .send(|result| Event::LoginCompleted(Box::new(result)));
        Ok(())
    }

    fn send_register(
        credentials: &Credentials,
        model: &Model,
        caps: &Capabilities,
    ) -> AppResult<()> {
        let body = CredentialsBody::from(credentials);
        Self::json_request(Operation::Register, model.config.register(), &body, caps)?
            .expect_json::<User>()
            .send(|result| Event::RegisterCompleted(Box::new(result)));
        Ok(())
    }

    fn send_genres(media_type: MediaType, model: &Model, caps: &Capabilities) -> AppResult<()> {
        Self::get_request(Operation::FetchGenres, model.config.genres(media_type), caps)?
            .expect_json::<GenresResponse>()
            .send(|result| Event::GenresFetched(Box::new(result)));
        Ok(())
    }

    fn send_video_key(movie_id: MovieId, model: &Model, caps: &Capabilities) -> AppResult<()> {
        Self::get_request(Operation::FetchVideoKey, model.config.video_key(movie_id), caps)?
            .expect_json::<VideoKeyResponse>()
            .send(|result| Event::VideoKeyFetched(Box::new(result)));
        Ok(())
    }

    fn send_liked_movies(email: &str, model: &Model, caps: &Capabilities) -> AppResult<()> {
        Self::get_request(
            Operation::FetchLikedMovies,
            model.config.liked_movies(email),
            caps,
        )?
        .expect_json::<MoviesResponse>()
        .send(|result| Event::LikedMoviesFetched(Box::new(result)));
        Ok(())
    }

    fn send_remove_liked(
        movie_id: MovieId,
        email: String,
        model: &Model,
        caps: &Capabilities,
    ) -> AppResult<()> {
        let body = RemoveLikedMovieRequest { email, movie_id };
        Self::json_request(
            Operation::RemoveLikedMovie,
            model.config.remove_liked_movie(),
            &body,
            caps,
        )?
        .expect_json::<MoviesResponse>()
        .send(|result| Event::LikedMovieRemoved(Box::new(result)));
        Ok(())
    }

    /// Requests the next page of `fetch`, or commits its movies once the
    /// movie cap or page budget is reached.
    fn continue_catalog_fetch(mut fetch: CatalogFetch, model: &mut Model, caps: &Capabilities) {
        let operation = fetch.operation();

        let Some(page) = fetch.next_page() else {
            let movies = fetch.finish();
            info!(
                operation = %operation,
                count = movies.len(),
                "catalog fetch finished"
            );
            model.apply(Outcome::MoviesLoaded(movies));
            caps.render.render();
            return;
        };

        let endpoint = model.config.catalog_page(fetch.source, page);
        match Self::get_request(operation, endpoint, caps) {
            Ok(builder) => {
                fetch.mark_requested(page);
                debug!(
                    operation = %operation,
                    fetch_id = %fetch.id,
                    page,
                    accumulated = fetch.movies.len(),
                    "requesting catalog page"
                );
                builder
                    .expect_json::<CatalogPage>()
                    .send(move |result| Event::CatalogPageFetched {
                        fetch: Box::new(fetch),
                        result: Box::new(result),
                    });
            }
            Err(error) => Self::fail(error, model, caps),
        }
    }

    fn start_catalog_fetch(source: CatalogSource, model: &mut Model, caps: &Capabilities) {
        let fetch = CatalogFetch::new(source, model.genres.clone());
        info!(
            operation = %fetch.operation(),
            fetch_id = %fetch.id,
            genres_loaded = model.genres_loaded,
            "catalog fetch started"
        );
        Self::continue_catalog_fetch(fetch, model, caps);
    }

    /// Folds a completed request into the model.
    fn settle<T>(
        operation: Operation,
        result: HttpResult<T>,
        model: &mut Model,
        caps: &Capabilities,
        on_success: impl FnOnce(T) -> Outcome,
    ) {
        match result {
            Ok(mut response) => match response.take_body() {
                Some(body) => {
                    info!(operation = %operation, "operation completed");
                    model.apply(on_success(body));
                    caps.render.render();
                }
                None => Self::fail(AppError::empty_response(operation), model, caps),
            },
            Err(e) => Self::fail(AppError::remote(operation, &e), model, caps),
        }
    }

    fn fail(error: AppError, model: &mut Model, caps: &Capabilities) {
        warn!(
            operation = %error.operation,
            code = error.code(),
            reason = %error.message,
            "operation failed"
        );
        model.apply(Outcome::Failed(error));
        caps.render.render();
    }

    fn report(result: AppResult<()>, model: &mut Model, caps: &Capabilities) {
        if let Err(error) = result {
            Self::fail(error, model, caps);
        }
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        if event.is_user_initiated() {
            debug!(event = event.name(), "user action");
        }

        match event {
            Event::Configure(config) => {
                model.config = *config;
                info!(
                    auth = %model.config.auth_url,
                    discovery = %model.config.discovery_url,
                    liked_movies = %model.config.liked_movies_url,
                    "service endpoints configured"
                );
            }

            Event::Login(credentials) => {
                let result = Self::send_login(&credentials, model, caps);
                Self::report(result, model, caps);
            }

            Event::Register(credentials) => {
                let result = Self::send_register(&credentials, model, caps);
                Self::report(result, model, caps);
            }

            Event::Logout => {
                model.apply(Outcome::LoggedOut);
                info!("logged out");
                caps.render.render();
            }

            Event::ClearError => {
                model.apply(Outcome::ErrorCleared);
                caps.render.render();
            }

            Event::FetchGenres { media_type } => {
                let result = Self::send_genres(media_type, model, caps);
                Self::report(result, model, caps);
            }

            Event::FetchMovies { media_type } => {
                Self::start_catalog_fetch(CatalogSource::Discover { media_type }, model, caps);
            }

            Event::FetchByGenre { genre, media_type } => {
                Self::start_catalog_fetch(
                    CatalogSource::Genre { media_type, genre },
                    model,
                    caps,
                );
            }

            Event::FetchVideoKey { movie_id } => {
                let result = Self::send_video_key(movie_id, model, caps);
                Self::report(result, model, caps);
            }

            Event::FetchLikedMovies { email } => {
                let result = Self::send_liked_movies(&email, model, caps);
                Self::report(result, model, caps);
            }

            Event::RemoveLikedMovie { movie_id, email } => {
                let result = Self::send_remove_liked(movie_id, email, model, caps);
                Self::report(result, model, caps);
            }

            Event::LoginCompleted(result) => {
                Self::settle(Operation::Login, *result, model, caps, |body| {
                    Outcome::LoggedIn(body.user)
                });
            }

            Event::RegisterCompleted(result) => {
                Self::settle(Operation::Register, *result, model, caps, Outcome::Registered);
            }

            Event::GenresFetched(result) => {
                Self::settle(Operation::FetchGenres, *result, model, caps, |body| {
                    Outcome::GenresLoaded(body.genres)
                });
            }

            Event::CatalogPageFetched { fetch, result } => {
                let mut fetch = *fetch;
                let operation = fetch.operation();
                match *result {
                    Ok(mut response) => {
                        let Some(page) = response.take_body() else {
                            Self::fail(AppError::empty_response(operation), model, caps);
                            return;
                        };
                        fetch.absorb(&page);
                        debug!(
                            operation = %operation,
                            fetch_id = %fetch.id,
                            page = fetch.pages_requested,
                            received = page.results.len(),
                            accumulated = fetch.movies.len(),
                            "catalog page received"
                        );
                        Self::continue_catalog_fetch(fetch, model, caps);
                    }
                    Err(e) => Self::fail(AppError::remote(operation, &e), model, caps),
                }
            }

            Event::VideoKeyFetched(result) => {
                Self::settle(Operation::FetchVideoKey, *result, model, caps, |body| {
                    Outcome::VideoKeyLoaded(body.key)
                });
            }

            Event::LikedMoviesFetched(result) => {
                Self::settle(Operation::FetchLikedMovies, *result, model, caps, |body| {
                    Outcome::LikedMoviesLoaded(body.movies)
                });
            }

            Event::LikedMovieRemoved(result) => {
                Self::settle(Operation::RemoveLikedMovie, *result, model, caps, |body| {
                    Outcome::LikedMovieRemoved(body.movies)
                });
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        ViewModel::from(model)
    }
}
