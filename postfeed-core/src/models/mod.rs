//! Domain models with validation at construction
//!
//! Caller input is validated when creating these types.
//! Invalid input returns an error, not a panic.

pub mod pagination;
pub mod post;
pub mod validation;

pub use pagination::{PagedResult, Pagination};
pub use post::{NewPost, Post};
pub use validation::ValidationError;
