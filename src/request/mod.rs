//! Request construction.
//!
//! Every request carries the same fixed client/device/locale query
//! parameters and device-context headers, then gets signed. GETs also carry
//! the session's `Authorization` header and bootstrap a session on demand.

mod builder;
mod factory;
mod headers;
mod params;

pub use builder::{RequestBuilder, GET_CACHE_MAX_AGE};
pub use factory::RequestFactory;
pub use headers::device_headers;
pub use params::{
    fixed_params, last_used_time, request_timestamp, ANONYMOUS_USER_ID, TIMESTAMP_FORMAT,
};
