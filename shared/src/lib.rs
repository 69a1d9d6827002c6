pub mod error;
pub mod models;
pub mod priority;
pub mod catalog;
pub mod validation;
pub mod tally;
pub mod results;

pub use error::{ErrorCode, ErrorResponse};
pub use models::*;
pub use priority::{Priority, PriorityError};
pub use catalog::{Catalog, CatalogError};
pub use validation::*;
pub use tally::{ModuleTally, PriorityCounts, Tally};
