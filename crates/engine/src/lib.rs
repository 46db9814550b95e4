//! # Quantscope Engine
//!
//! The result assembler: turns one `AnalyticsRequest` into one `AnalyticsResponse`
//! by wiring the analytics and simulator crates together.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Orchestration:** No statistics are computed here. The engine only
//!   sequences the lower layers and decides which of them may run.
//! - **Partial results:** Each component lands in its own `Outcome`, so a request
//!   with too little data for a simulation still returns its risk metrics.
//! - **Explicit staleness:** Callers that recompute on selection changes tag each
//!   request with an id from `SelectionGuard` and drop results it rejects.

pub mod assembler;
pub mod error;
pub mod guard;
pub mod request;
pub mod response;

pub use assembler::ReportAssembler;
pub use error::EngineError;
pub use guard::{Discarded, SelectionGuard};
pub use request::{AnalyticsParams, AnalyticsRequest, RequestId};
pub use response::{AnalyticsResponse, ForecastView, Outcome};
