//! Admin page script injection subsystem.
//!
//! # Data Flow
//! ```text
//! Admin page request
//!     → upstream renders the admin HTML
//!     → inject.rs (buffer body, splice script before </head>)
//!     → blocks.rs (script markup unregistering the author blocks)
//!     → Send to client
//! ```

pub mod blocks;
pub mod inject;
