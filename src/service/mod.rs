//! Business rules per entity, written against the `CatalogStore` seam.

mod games;
mod ownerships;
mod publishers;
mod users;
mod validation;

pub use games::*;
pub use ownerships::*;
pub use publishers::*;
pub use users::*;
pub use validation::RequestValidator;
