//! Transports implementing [`isowalk_core::WalkService`].
//!
//! [`HttpWalkService`] talks to the real service over HTTPS. The
//! [`WalkService`](isowalk_core::WalkService) trait is synchronous, so the
//! HTTP implementation blocks on asynchronous `reqwest` calls internally,
//! keeping callers free of any async runtime requirements.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use isowalk_core::{IsochroneParams, WalkService};
//! use isowalk_data::service::{HttpWalkService, WalkServiceConfig};
//!
//! let config = WalkServiceConfig::new("https://api.walkalytics.com")
//!     .with_subscription_key("0123456789abcdef")
//!     .with_timeout(Duration::from_secs(60));
//! let service = HttpWalkService::with_config(config)?;
//!
//! let query = IsochroneParams::at(8.54, 47.37).validate()?;
//! let response = service.isochrone(&query, &[])?;
//! println!("status {}", response.status());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod http;

#[doc(hidden)]
pub mod test_support;

pub use http::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpWalkService, SUBSCRIPTION_KEY_HEADER,
    ServiceBuildError, WalkServiceConfig,
};
