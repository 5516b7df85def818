use reqwest::Client;
use tracing::warn;

use crate::error::FetchError;
use crate::models::OmdbMovie;

const OMDB_BASE_URL: &str = "https://www.omdbapi.com/";

/// Client for the OMDB catalog: one lookup request per title. OMDB signals
/// failure inside a 200 payload through its `Response` field, so the HTTP
/// status alone is not trusted.
#[derive(Clone)]
pub struct OmdbClient {
    http: Client,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
        }
    }

    /// Look a title up. `Ok(None)` when OMDB reports no match (the embedded
    /// error message is logged); `FetchError::Transport` on connectivity or
    /// HTTP failure. Single best-effort attempt, no retry.
    pub async fn fetch_movie(&self, title: &str) -> Result<Option<OmdbMovie>, FetchError> {
        let url = format!(
            "{}?t={}&apikey={}",
            OMDB_BASE_URL,
            urlencoding::encode(title),
            self.api_key
        );

        let movie: OmdbMovie = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(accept(movie))
    }
}

/// Keep the record only when the payload carries the success sentinel.
fn accept(movie: OmdbMovie) -> Option<OmdbMovie> {
    if movie.is_success() {
        Some(movie)
    } else {
        warn!(
            "OMDB lookup rejected: {}",
            movie.error.as_deref().unwrap_or("Unknown error")
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_false_is_rejected() {
        let movie: OmdbMovie =
            serde_json::from_str(r#"{"Response": "False", "Error": "Movie not found!"}"#).unwrap();
        assert!(accept(movie).is_none());
    }

    #[test]
    fn response_true_keeps_full_record() {
        let movie: OmdbMovie = serde_json::from_str(
            r#"{"Response": "True", "Title": "Inception", "Plot": "A thief enters dreams."}"#,
        )
        .unwrap();
        let kept = accept(movie).expect("successful payload should be kept");
        assert_eq!(kept.title, "Inception");
        assert_eq!(kept.plot, "A thief enters dreams.");
    }

    #[test]
    fn missing_response_field_is_rejected() {
        // Defensive default: an empty Response is not the success sentinel.
        let movie: OmdbMovie = serde_json::from_str(r#"{"Title": "Inception"}"#).unwrap();
        assert!(accept(movie).is_none());
    }
}
