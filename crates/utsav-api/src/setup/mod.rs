//! Application assembly: telemetry, services, routes, server.

pub mod routes;
pub mod server;
pub mod services;
pub mod telemetry;

pub use routes::build_router;
pub use services::build_state;
