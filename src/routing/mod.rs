//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     RoutingConfig + LocationConfig
//!     → configurator.rs (build RouteTable, LocationMode)
//!     → RouterConfiguration handed to navigator / shell server
//!
//! Navigation:
//!     Browser location
//!     → location.rs (extract route path + query)
//!     → router.rs (first exact match, else fallback redirect)
//!     → matcher.rs (path comparison)
//!     → navigator.rs (load template, activate controller)
//! ```
//!
//! # Design Decisions
//! - Routes are an enum: the path → view/controller mapping is checked at compile time
//! - Table built at startup, immutable at runtime
//! - Deterministic: same path always resolves the same way
//! - First match wins (declaration order)

pub mod configurator;
pub mod location;
pub mod matcher;
pub mod navigator;
pub mod route;
pub mod router;

pub use configurator::RouterConfiguration;
pub use location::{Location, LocationMode};
pub use navigator::{Navigation, NavigationError, Navigator, ViewLayer};
pub use route::{Controller, Route, ViewTemplate};
pub use router::{Resolution, RouteEntry, RouteTable, RouteTableBuilder, RoutingError};
