//! Service implementations for the Misfit API.
//!
//! Provides the authenticated resource fetches and the push subscription
//! handshake.

mod resources;
mod subscription;

pub use resources::ResourceService;
pub use subscription::{SubscriptionService, SUBSCRIBE_URL_FIELD};
