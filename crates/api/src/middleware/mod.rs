/// Identity selected by the caller, carried in request headers
pub mod context;
/// Mapping of domain errors onto HTTP responses
pub mod error_handling;
