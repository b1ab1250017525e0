pub mod authentication;
pub mod configuration;
pub mod error_handling;
pub mod routes;
pub mod session_state;
pub mod startup;
pub mod telemetry;
