pub mod amortization;
pub mod cash_flow;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod scenario;
pub mod types;
pub mod validate;

pub use error::{RealtyMetricsError, ValidationError};
pub use types::*;

/// Standard result type for all realty-metrics operations
pub type RealtyMetricsResult<T> = Result<T, RealtyMetricsError>;
