//! Validated resource requests.
//!
//! Every constructor validates synchronously, so a request that exists is
//! ready to send.

use std::fmt;

use super::dates::{DateRange, END_DATE_FIELD, START_DATE_FIELD};
use super::resource::{
    Resource, ResourceOptions, SummaryOptions, DEFAULT_USER_ID, USER_ID_PLACEHOLDER,
};
use crate::errors::{MisfitError, MisfitResult};

/// Argument name reported for a missing access token.
pub const ACCESS_TOKEN_FIELD: &str = "access_token";

/// Fails with every empty argument listed, in argument order.
pub(crate) fn ensure_present(fields: &[(&str, &str)]) -> MisfitResult<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(MisfitError::required(missing))
    }
}

/// One authenticated GET against a resource path.
#[derive(Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    resource: Option<Resource>,
    path_template: String,
    query: Vec<(String, String)>,
    user_id: Option<String>,
    object_id: Option<String>,
    access_token: String,
}

impl ResourceRequest {
    /// Creates a request for an arbitrary path template.
    ///
    /// The template must contain exactly one `{user_id}` placeholder.
    pub fn new(
        access_token: impl Into<String>,
        path_template: impl Into<String>,
    ) -> MisfitResult<Self> {
        let access_token = access_token.into();
        let path_template = path_template.into();

        ensure_present(&[(ACCESS_TOKEN_FIELD, access_token.as_str())])?;

        let placeholders = path_template.matches(USER_ID_PLACEHOLDER).count();
        if placeholders != 1 {
            return Err(MisfitError::invalid_parameter(
                "path_template",
                path_template,
                format!(
                    "expected exactly one {} placeholder, found {}",
                    USER_ID_PLACEHOLDER, placeholders
                ),
            ));
        }

        Ok(Self {
            resource: None,
            path_template,
            query: Vec::new(),
            user_id: None,
            object_id: None,
            access_token,
        })
    }

    /// Profile request.
    pub fn profile(access_token: &str, options: &ResourceOptions) -> MisfitResult<Self> {
        Self::undated(Resource::Profile, access_token, options)
    }

    /// Device request.
    pub fn device(access_token: &str, options: &ResourceOptions) -> MisfitResult<Self> {
        Self::undated(Resource::Device, access_token, options)
    }

    /// Goals request over a date range.
    pub fn goals(
        access_token: &str,
        start_date: &str,
        end_date: &str,
        options: &ResourceOptions,
    ) -> MisfitResult<Self> {
        Self::dated(Resource::Goals, access_token, start_date, end_date, options)
    }

    /// Sessions request over a date range.
    pub fn sessions(
        access_token: &str,
        start_date: &str,
        end_date: &str,
        options: &ResourceOptions,
    ) -> MisfitResult<Self> {
        Self::dated(Resource::Sessions, access_token, start_date, end_date, options)
    }

    /// Sleeps request over a date range.
    pub fn sleeps(
        access_token: &str,
        start_date: &str,
        end_date: &str,
        options: &ResourceOptions,
    ) -> MisfitResult<Self> {
        Self::dated(Resource::Sleeps, access_token, start_date, end_date, options)
    }

    /// Summary request over a date range. `detail=true` is only sent when set.
    pub fn summary(
        access_token: &str,
        start_date: &str,
        end_date: &str,
        options: &SummaryOptions,
    ) -> MisfitResult<Self> {
        ensure_present(&[
            (ACCESS_TOKEN_FIELD, access_token),
            (START_DATE_FIELD, start_date),
            (END_DATE_FIELD, end_date),
        ])?;
        let range = DateRange::parse(start_date, end_date)?;

        let mut request = Self::for_resource(Resource::Summary, access_token).with_range(&range);
        if options.detail {
            request = request.query("detail", "true");
        }
        if let Some(user_id) = &options.user_id {
            request = request.user_id(user_id.clone());
        }
        Ok(request)
    }

    fn undated(
        resource: Resource,
        access_token: &str,
        options: &ResourceOptions,
    ) -> MisfitResult<Self> {
        ensure_present(&[(ACCESS_TOKEN_FIELD, access_token)])?;
        Ok(Self::for_resource(resource, access_token).with_options(options))
    }

    fn dated(
        resource: Resource,
        access_token: &str,
        start_date: &str,
        end_date: &str,
        options: &ResourceOptions,
    ) -> MisfitResult<Self> {
        ensure_present(&[
            (ACCESS_TOKEN_FIELD, access_token),
            (START_DATE_FIELD, start_date),
            (END_DATE_FIELD, end_date),
        ])?;
        let range = DateRange::parse(start_date, end_date)?;

        Ok(Self::for_resource(resource, access_token)
            .with_range(&range)
            .with_options(options))
    }

    fn for_resource(resource: Resource, access_token: &str) -> Self {
        Self {
            resource: Some(resource),
            path_template: resource.path_template().to_string(),
            query: Vec::new(),
            user_id: None,
            object_id: None,
            access_token: access_token.to_string(),
        }
    }

    fn with_range(mut self, range: &DateRange) -> Self {
        self.query.extend(range.query_pairs());
        self
    }

    fn with_options(mut self, options: &ResourceOptions) -> Self {
        self.user_id = options.user_id.clone();
        self.object_id = options.object_id.clone();
        self
    }

    /// Appends a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Sets the user id; empty means `"me"`.
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Addresses a single object; empty is ignored.
    pub fn object_id(mut self, object_id: impl Into<String>) -> Self {
        self.object_id = Some(object_id.into());
        self
    }

    /// The catalogue resource, if built through a resource constructor.
    pub fn resource(&self) -> Option<Resource> {
        self.resource
    }

    /// The unresolved path template.
    pub fn path_template(&self) -> &str {
        &self.path_template
    }

    /// Query parameters, in send order.
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// User id the request addresses.
    pub fn effective_user_id(&self) -> &str {
        self.user_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(DEFAULT_USER_ID)
    }

    /// Resolved request path: user id substituted, object id appended.
    pub fn path(&self) -> String {
        let mut path = self
            .path_template
            .replacen(USER_ID_PLACEHOLDER, self.effective_user_id(), 1);

        if let Some(object_id) = self.object_id.as_deref().filter(|id| !id.is_empty()) {
            path.push('/');
            path.push_str(object_id);
        }

        path
    }

    pub(crate) fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for ResourceRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceRequest")
            .field("resource", &self.resource)
            .field("path", &self.path())
            .field("query", &self.query)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}
