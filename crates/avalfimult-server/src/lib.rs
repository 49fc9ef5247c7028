//! AvalFIMult Server
//!
//! HTTP front end of the fund viability scorer. A request to `/avalfimult`
//! flows through:
//! 1. Input validation of the four query parameters
//! 2. The business rule gate (net equity floor)
//! 3. The scoring procedure (scaler, classifier, verdict)

pub mod cli;
pub mod config;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod validation;

pub use cli::Cli;
pub use config::{LogFormat, ResponseMode, ServerConfig};
pub use routes::create_router;
pub use state::AppState;
