// Infrastructure layer - External dependencies and adapters
pub mod chunked_json;
pub mod config;
pub mod csv_dataset;
pub mod http_response;
