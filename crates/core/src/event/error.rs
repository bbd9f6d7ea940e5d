use thiserror::Error;

/// Errors produced while validating a create or update payload.
///
/// Messages name the offending field in quotes so they can be returned to the
/// client verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("\"value\" must be of type object")]
    NotAnObject,
    #[error("\"{0}\" is required")]
    Required(&'static str),
    #[error("\"{0}\" is not allowed")]
    NotAllowed(String),
    #[error("\"{0}\" must be a string")]
    NotAString(&'static str),
    #[error("\"{0}\" is not allowed to be empty")]
    Empty(&'static str),
    #[error("\"{field}\" length must be less than or equal to {max} characters long")]
    TooLong { field: &'static str, max: usize },
    #[error("\"{field}\" must be one of [{allowed}]")]
    NotOneOf {
        field: &'static str,
        allowed: String,
    },
    #[error("\"{0}\" must be a valid date")]
    InvalidDate(&'static str),
    #[error("\"{0}\" must be a valid GUID")]
    InvalidGuid(&'static str),
}

/// A path identifier that is not a v4 UUID.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("\"id\" must be a valid GUID")]
pub struct IdError;

/// Domain rule violations detected after validation succeeded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Invalid date interval. The \"startDate\" must be less than or equal to the \"endDate\"")]
    InvalidInterval,
    #[error("An event exists within the desired time span. Please choose another time interval.")]
    Overlap,
}

/// Errors raised while reading the date window of a list request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateQueryError {
    #[error("To query events by a date interval, both starting and ending dates are required")]
    PartialRange,
    #[error("\"{param}\" must be a valid date or milliseconds since epoch, got \"{value}\"")]
    InvalidDate { param: &'static str, value: String },
    #[error("\"startDate\" must be less than or equal to \"endDate\"")]
    InvalidRange,
}
