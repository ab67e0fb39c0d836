//! Push subscription handshake payload.

use serde::{Deserialize, Serialize};

use crate::errors::MisfitResult;

/// Confirmation message pushed when a subscription is created.
///
/// The subscriber confirms by issuing a GET to `subscribe_url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionConfirmation {
    /// URL to visit to confirm the subscription.
    #[serde(rename = "subscribeUrl", alias = "SubscribeURL", default)]
    pub subscribe_url: String,

    /// Message type, e.g. `SubscriptionConfirmation`.
    #[serde(rename = "Type", alias = "type", default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,

    /// Topic the subscription belongs to.
    #[serde(
        rename = "TopicArn",
        alias = "topicArn",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub topic_arn: Option<String>,
}

impl SubscriptionConfirmation {
    /// Creates a confirmation for a URL.
    pub fn new(subscribe_url: impl Into<String>) -> Self {
        Self {
            subscribe_url: subscribe_url.into(),
            ..Self::default()
        }
    }

    /// Parses a pushed confirmation message.
    pub fn from_json(body: &str) -> MisfitResult<Self> {
        Ok(serde_json::from_str(body)?)
    }
}
