use serde::{Deserialize, Serialize};

/// Base URL for TMDB poster images (w500 rendition).
const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TmdbGenre {
    pub id: i64,
    pub name: String,
}

/// Detail record from the TMDB catalog. The upstream payload carries many
/// more fields; everything we read is defaulted so a sparse or drifting
/// response never fails the parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbMovie {
    pub title: String,
    pub original_title: String,
    pub overview: String,
    pub release_date: String,
    pub vote_average: f64,
    pub poster_path: Option<String>,
    pub genres: Vec<TmdbGenre>,
}

impl TmdbMovie {
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_ref()
            .map(|path| format!("{}{}", POSTER_BASE_URL, path))
    }

    pub fn genre_names(&self) -> Vec<String> {
        self.genres.iter().map(|g| g.name.clone()).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchHit {
    pub id: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbSearchResponse {
    pub results: Vec<TmdbSearchHit>,
}

/// Record from the OMDB catalog. OMDB reports lookup failure inside an
/// HTTP 200 payload via the `Response` field, so that field is part of the
/// record rather than mapped to a transport error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OmdbMovie {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Plot")]
    pub plot: String,
    #[serde(rename = "Error")]
    pub error: Option<String>,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Rated")]
    pub rated: String,
    #[serde(rename = "Runtime")]
    pub runtime: String,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "Director")]
    pub director: String,
    #[serde(rename = "Actors")]
    pub actors: String,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: String,
}

impl OmdbMovie {
    /// OMDB's success sentinel is the literal string `"True"`.
    pub fn is_success(&self) -> bool {
        self.response == "True"
    }
}

// ---- API DTOs ----

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub guide: String,
}

#[derive(Debug, Deserialize)]
pub struct FetchRequest {
    pub title: String,
}

/// The movie card the front end renders: the TMDB fields the original page
/// displayed, with the poster path already resolved to a full image URL.
#[derive(Debug, Serialize)]
pub struct MovieCard {
    pub title: String,
    pub release_date: String,
    pub rating: f64,
    pub genres: Vec<String>,
    pub overview: String,
    pub poster_url: Option<String>,
}

impl From<&TmdbMovie> for MovieCard {
    fn from(movie: &TmdbMovie) -> Self {
        Self {
            title: movie.title.clone(),
            release_date: movie.release_date.clone(),
            rating: movie.vote_average,
            genres: movie.genre_names(),
            overview: movie.overview.clone(),
            poster_url: movie.poster_url(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FetchResponse {
    pub session_id: String,
    pub movie: MovieCard,
    pub details: Option<OmdbMovie>,
    /// `None` means "no summary available", not an error.
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub session_id: String,
    /// `None` means "no answer available", not an error.
    pub answer: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub guide_displayed: bool,
    pub guide: Option<String>,
    pub movie: Option<MovieCard>,
    pub details: Option<OmdbMovie>,
    pub summary: Option<String>,
}
