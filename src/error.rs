use thiserror::Error;

/// Failure of a catalog lookup.
///
/// "No matching movie" is not an error; the fetchers express it as
/// `Ok(None)`. This type covers transport and HTTP-level failures only, so
/// callers can log the two cases apart even where they present them the
/// same way to the user.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Failure of the two-stage summarization pipeline, naming the stage that
/// broke. The user-facing contract stays "summary unavailable"; this exists
/// for logs and tests.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("narrative stage failed: {0}")]
    Narrative(#[source] anyhow::Error),
    #[error("condense stage failed: {0}")]
    Condense(#[source] anyhow::Error),
}
