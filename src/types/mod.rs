//! Request, response and payload types for the Misfit API.

pub mod dates;
pub mod models;
pub mod request;
pub mod resource;
pub mod subscription;
pub mod token;

pub use dates::{DateRange, DATE_FORMAT, MAX_RANGE_DAYS};
pub use models::{
    Device, Goal, GoalList, Profile, Session, SessionList, Sleep, SleepDetail, SleepList,
    SleepState, Summary, SummaryList,
};
pub use request::ResourceRequest;
pub use resource::{Resource, ResourceOptions, SummaryOptions, DEFAULT_USER_ID};
pub use subscription::SubscriptionConfirmation;
pub use token::{ResponseType, TokenResponse};
