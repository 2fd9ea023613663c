//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, request span from caller's trace context)
//!     → handlers.rs
//!         POST /           → forward.rs (pass-through to configured target)
//!         GET /{zipcode}   → pipeline (city → weather → scales)
//!     → response.rs (errors → status codes)
//!     → Send to client
//! ```

pub mod forward;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use forward::{ForwardError, Forwarder};
pub use request::X_REQUEST_ID;
pub use response::ApiError;
pub use server::{AppState, HttpServer};
