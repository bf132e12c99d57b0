//! Typed records per entity. Field names on the wire are fixed (PascalCase).

mod games;
mod ownerships;
mod publishers;
mod users;

pub use games::*;
pub use ownerships::*;
pub use publishers::*;
pub use users::*;
