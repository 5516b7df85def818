pub mod answer;
pub mod catalog;
pub mod config;
pub mod error;
pub mod llm;
pub mod merge;
pub mod models;
pub mod sanitize;
pub mod service;
pub mod session;
pub mod summarize;

// Re-export commonly used types
pub use config::Config;
pub use error::{FetchError, SummaryError};
pub use service::{create_app, AppState};
pub use session::{InMemorySessionStorage, Session, SessionStorage};
