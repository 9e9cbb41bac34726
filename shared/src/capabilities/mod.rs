mod http;

pub use self::http::{EndpointError, HttpMethod, ValidatedUrl, MAX_URL_LENGTH};

/// Render capability re-export.
///
/// A render request is how subscribers learn the model changed; the shell
/// answers it by reading `view()`.
pub use crux_core::render::Render;
pub use crux_http::Http;

use crate::event::Event;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub http: Http<Event>,
    pub render: Render<Event>,
}
