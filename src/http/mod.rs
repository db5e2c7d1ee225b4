//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware wiring)
//!     → request.rs (add request ID)
//!     → gate layers (responder short-circuit, rewrites)
//!     → upstream.rs (forward to origin)
//!     → Send to client
//! ```

pub mod request;
pub mod server;
pub mod upstream;

pub use request::X_REQUEST_ID;
pub use server::HttpServer;
