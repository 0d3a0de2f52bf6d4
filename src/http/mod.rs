//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign request ID)
//!     → asset prefix? → ServeDir (view templates)
//!     → otherwise navigate handler:
//!         site.rs (current route table, location mode, shell)
//!         → routing (resolve path)
//!         → response.rs (shell page or redirect)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;
pub mod site;

pub use request::{RequestId, RequestIdExt, X_REQUEST_ID};
pub use response::{X_ROUTE, X_VIEW_CONTROLLER, X_VIEW_TEMPLATE};
pub use server::{AppState, HttpServer};
pub use site::{Shell, Site, SiteError};
