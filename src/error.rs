use thiserror::Error;

/// Failure taxonomy for the scraping pipeline.
///
/// The first four conditions are fatal to a run: without the frame, the
/// stream id or the base media path there is nothing to build a playlist
/// from. `EmptyListing` is raised by the orchestrator when the lister
/// comes back with zero channels; inside the lister an empty result is a
/// valid value, not an error.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("required element `{selector}` not found on the page")]
    ElementNotFound { selector: String },

    #[error("element `{selector}` has no `{attribute}` attribute")]
    MissingAttribute { selector: String, attribute: String },

    #[error("no `{param}` parameter in the query string of {url}")]
    MissingIdentifier { url: String, param: String },

    #[error("no base media path matching `{pattern}` in the page source")]
    PatternNotFound { pattern: &'static str },

    #[error("listing contained no channels")]
    EmptyListing,

    #[error("timed out loading {url}")]
    NavigationTimeout { url: String },

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("browser driver error: {0}")]
    Driver(#[from] chromiumoxide::error::CdpError),
}
