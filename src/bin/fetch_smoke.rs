//! Live-network smoke check for the catalog fetchers and the plot merger.
//! Needs real TMDB_API_KEY and OMDB_API_KEY values; run manually with
//! `cargo run --bin fetch_smoke -- "Inception"`.

use film_assistant::catalog::{OmdbClient, TmdbClient};
use film_assistant::merge::merge_records;
use film_assistant::sanitize::sanitize_input;
use std::env;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let (Ok(tmdb_key), Ok(omdb_key)) = (env::var("TMDB_API_KEY"), env::var("OMDB_API_KEY")) else {
        error!("TMDB_API_KEY and OMDB_API_KEY must be set for the live smoke check");
        return Ok(());
    };

    let title = sanitize_input(
        &env::args()
            .nth(1)
            .unwrap_or_else(|| "Inception".to_string()),
    );
    info!("looking up: {}", title);

    let tmdb = TmdbClient::new(tmdb_key).fetch_movie(&title).await?;
    match &tmdb {
        Some(movie) => info!(
            "TMDB: {} ({}) rating {} genres {:?}",
            movie.title,
            movie.release_date,
            movie.vote_average,
            movie.genre_names()
        ),
        None => info!("TMDB: no results"),
    }

    let omdb = OmdbClient::new(omdb_key).fetch_movie(&title).await?;
    match &omdb {
        Some(movie) => info!("OMDB: {}: {}", movie.title, movie.plot),
        None => info!("OMDB: no results"),
    }

    let merged = merge_records(tmdb.as_ref(), omdb.as_ref());
    info!("merged title: {}", merged.title);
    info!("merged plot ({} chars): {}", merged.plot.len(), merged.plot);

    Ok(())
}
