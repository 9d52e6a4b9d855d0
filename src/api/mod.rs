//! # API Module
//!
//! HTTP endpoints of the widget server.
//!
//! ## Endpoints
//!
//! - [`widget`] - The now-playing page itself, meant for a browser source or
//!   an iframe. It reloads on the poll cadence.
//! - [`now_playing`] - The current observation as JSON, for custom front ends.
//! - [`health`] - Application status and version for monitoring.
//!
//! Handlers only read the poller's observation slot. They never trigger a
//! request to Spotify themselves, so page views do not add to the API load.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spotnow::api::{health, now_playing, widget};
//!
//! let app = Router::new()
//!     .route("/", get(widget))
//!     .route("/api/now-playing", get(now_playing))
//!     .route("/health", get(health));
//! ```

mod health;
mod now_playing;
mod widget;

pub use health::health;
pub use now_playing::now_playing;
pub use widget::widget;
