pub mod configuration;
pub mod http_client;
pub mod main_context;
pub mod non_empty_string;
pub mod tracing;
