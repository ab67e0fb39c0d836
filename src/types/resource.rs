//! Resource catalogue and per-call options.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder substituted with the user id in a path template.
pub const USER_ID_PLACEHOLDER: &str = "{user_id}";

/// User id addressing the owner of the access token.
pub const DEFAULT_USER_ID: &str = "me";

/// Fitness data categories exposed by the Misfit resource API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    /// User profile.
    Profile,
    /// Paired device.
    Device,
    /// Daily activity goals.
    Goals,
    /// Activity summary.
    Summary,
    /// Activity sessions.
    Sessions,
    /// Sleep records.
    Sleeps,
}

impl Resource {
    /// All resources, in API documentation order.
    pub const ALL: [Resource; 6] = [
        Resource::Profile,
        Resource::Device,
        Resource::Goals,
        Resource::Summary,
        Resource::Sessions,
        Resource::Sleeps,
    ];

    /// Path template with a single [`USER_ID_PLACEHOLDER`].
    pub fn path_template(self) -> &'static str {
        match self {
            Resource::Profile => "/move/resource/v1/user/{user_id}/profile",
            Resource::Device => "/move/resource/v1/user/{user_id}/device",
            Resource::Goals => "/move/resource/v1/user/{user_id}/activity/goals",
            Resource::Summary => "/move/resource/v1/user/{user_id}/activity/summary",
            Resource::Sessions => "/move/resource/v1/user/{user_id}/activity/sessions",
            Resource::Sleeps => "/move/resource/v1/user/{user_id}/activity/sleeps",
        }
    }

    /// Whether the resource requires a start/end date range.
    pub fn is_date_bounded(self) -> bool {
        !matches!(self, Resource::Profile | Resource::Device)
    }

    /// Whether a single object can be addressed by id.
    pub fn supports_object_id(self) -> bool {
        self != Resource::Summary
    }

    /// Lower-case resource name.
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Profile => "profile",
            Resource::Device => "device",
            Resource::Goals => "goals",
            Resource::Summary => "summary",
            Resource::Sessions => "sessions",
            Resource::Sleeps => "sleeps",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for profile, device, goals, sessions and sleeps fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceOptions {
    /// User to fetch for; defaults to `"me"`.
    pub user_id: Option<String>,
    /// Fetch a single object instead of the collection.
    pub object_id: Option<String>,
}

impl ResourceOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the user id.
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Sets the object id.
    pub fn object_id(mut self, object_id: impl Into<String>) -> Self {
        self.object_id = Some(object_id.into());
        self
    }
}

/// Options for summary fetches. Summaries have no object addressing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryOptions {
    /// User to fetch for; defaults to `"me"`.
    pub user_id: Option<String>,
    /// Return one summary per day instead of a single aggregate.
    pub detail: bool,
}

impl SummaryOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the user id.
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Requests per-day detail.
    pub fn detail(mut self, detail: bool) -> Self {
        self.detail = detail;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_template_has_one_placeholder() {
        for resource in Resource::ALL {
            assert_eq!(
                resource.path_template().matches(USER_ID_PLACEHOLDER).count(),
                1,
                "{}",
                resource
            );
        }
    }

    #[test]
    fn test_date_bounded_resources() {
        assert!(!Resource::Profile.is_date_bounded());
        assert!(!Resource::Device.is_date_bounded());
        assert!(Resource::Goals.is_date_bounded());
        assert!(Resource::Summary.is_date_bounded());
        assert!(Resource::Sessions.is_date_bounded());
        assert!(Resource::Sleeps.is_date_bounded());
    }

    #[test]
    fn test_only_summary_lacks_object_ids() {
        let without: Vec<_> = Resource::ALL
            .into_iter()
            .filter(|r| !r.supports_object_id())
            .collect();
        assert_eq!(without, vec![Resource::Summary]);
    }

    #[test]
    fn test_options_builders() {
        let options = ResourceOptions::new().user_id("u1").object_id("o1");
        assert_eq!(options.user_id.as_deref(), Some("u1"));
        assert_eq!(options.object_id.as_deref(), Some("o1"));

        let summary = SummaryOptions::new().detail(true);
        assert!(summary.detail);
        assert_eq!(summary.user_id, None);
    }
}
