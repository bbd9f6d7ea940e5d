mod error;
mod interval;
mod operations;
mod query;
mod types;
mod validation;

pub use error::{DateQueryError, EventError, IdError, ValidationError};
pub use interval::{
    conflict_span, is_all_day_event, is_same_day, is_valid_interval, overlaps, validate_schedule,
};
pub use operations::{filter_events_in_window, matches_window, sort_events_by_start};
pub use query::{parse_date_window, DateParam};
pub use types::{Event, EventPatch, EventStatus, NewEvent, Repeats};
pub use validation::{
    parse_event_id, validate_create, validate_update, DESCRIPTION_MAX_LEN, TITLE_MAX_LEN,
};
