//! Request and response bodies of the backend, in its camelCase wire format.
//!
//! Timestamps are passed through as the backend's `yyyy-MM-dd HH:mm:ss`
//! strings.

mod activity;
mod certificate;
mod common;
mod mall;
mod notification;
mod record;
mod signup;
mod statistics;
mod user;

pub mod codes;

pub use activity::*;
pub use certificate::*;
pub use common::*;
pub use mall::*;
pub use notification::*;
pub use record::*;
pub use signup::*;
pub use statistics::*;
pub use user::*;
