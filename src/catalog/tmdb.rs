use reqwest::Client;
use tracing::info;

use crate::error::FetchError;
use crate::models::{TmdbMovie, TmdbSearchResponse};

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Client for the TMDB catalog. A lookup is two hops: a fuzzy title search,
/// then a detail request for the first hit's id.
#[derive(Clone)]
pub struct TmdbClient {
    http: Client,
    api_key: String,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
        }
    }

    /// Resolve a title to a full detail record.
    ///
    /// `Ok(None)` means the search produced zero results. Connectivity
    /// failures and non-2xx statuses at either hop surface as
    /// `FetchError::Transport`. Single best-effort attempt, no retry.
    pub async fn fetch_movie(&self, title: &str) -> Result<Option<TmdbMovie>, FetchError> {
        let search_url = format!(
            "{}/search/movie?query={}&api_key={}",
            TMDB_BASE_URL,
            urlencoding::encode(title),
            self.api_key
        );

        let search: TmdbSearchResponse = self
            .http
            .get(&search_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(movie_id) = first_hit(&search) else {
            info!("no TMDB results for: {}", title);
            return Ok(None);
        };

        let details_url = format!(
            "{}/movie/{}?api_key={}",
            TMDB_BASE_URL, movie_id, self.api_key
        );

        let movie: TmdbMovie = self
            .http
            .get(&details_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(Some(movie))
    }
}

fn first_hit(search: &TmdbSearchResponse) -> Option<u64> {
    search.results.first().map(|hit| hit.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_results_mean_no_hit() {
        let search: TmdbSearchResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(first_hit(&search).is_none());
    }

    #[test]
    fn missing_results_field_means_no_hit() {
        let search: TmdbSearchResponse =
            serde_json::from_str(r#"{"total_results": 0, "page": 1}"#).unwrap();
        assert!(first_hit(&search).is_none());
    }

    #[test]
    fn first_hit_is_selected() {
        let search: TmdbSearchResponse = serde_json::from_str(
            r#"{"results": [{"id": 27205, "title": "Inception"}, {"id": 64956}]}"#,
        )
        .unwrap();
        assert_eq!(first_hit(&search), Some(27205));
    }
}
