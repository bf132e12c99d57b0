//! HTTP handlers per resource. Each one extracts, delegates to its service and wraps the result.

pub mod games;
pub mod ownerships;
pub mod publishers;
pub mod users;
