// Application layer - Use cases over the loaded dataset
pub mod dashboard_service;
pub mod dataset_service;
pub mod dataset_source;
pub mod errors;
pub mod streaming_service;
