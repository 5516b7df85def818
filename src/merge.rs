use crate::models::{OmdbMovie, TmdbMovie};

/// The payload the summarizer works on: the TMDB overview and the OMDB plot
/// joined into one text, plus the title to anchor the prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedPlot {
    pub title: String,
    pub plot: String,
}

/// Merge the two catalog records. Either record may be absent; missing
/// fields default to the empty string. The two plot texts are concatenated
/// directly, with no separator, and the title comes from TMDB's
/// `original_title`.
pub fn merge_records(tmdb: Option<&TmdbMovie>, omdb: Option<&OmdbMovie>) -> MergedPlot {
    let overview = tmdb.map(|m| m.overview.as_str()).unwrap_or("");
    let plot = omdb.map(|m| m.plot.as_str()).unwrap_or("");

    MergedPlot {
        title: tmdb.map(|m| m.original_title.clone()).unwrap_or_default(),
        plot: format!("{}{}", overview, plot),
    }
}
