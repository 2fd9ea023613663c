//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing spans/events (structured logs via logging.rs)
//!     → metrics.rs (counters, histograms)
//!
//! Spans additionally flow:
//!     → tracing-opentelemetry layer → telemetry.rs (OTLP exporter)
//!
//! Across process boundaries:
//!     inbound headers → propagation.rs (extract) → request span parent
//!     current span → propagation.rs (inject) → outbound headers
//! ```

pub mod logging;
pub mod metrics;
pub mod propagation;
pub mod telemetry;

pub use propagation::Propagation;
pub use telemetry::{Telemetry, TelemetryError};
