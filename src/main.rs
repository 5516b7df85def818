use film_assistant::{create_app, Config};
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Missing catalog or model keys are fatal at startup
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    let port = config.port;
    let app = create_app(config);
    let listener = TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    let addr = listener.local_addr()?;

    info!("Film Assistant Service starting on {}", addr);
    info!("Health check endpoint: GET http://{}/health", addr);
    info!("Create a session:     POST http://{}/sessions", addr);
    info!("Fetch movie info:     POST http://{}/sessions/{{id}}/fetch", addr);
    info!("Ask a question:       POST http://{}/sessions/{{id}}/question", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
