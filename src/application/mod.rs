// Application layer - use cases and orchestration over the store.
// Validation lives in the domain, aggregation in `domain::compute_dashboard`.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
