//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. Following the
//! "New Type" pattern, [`NewUrlEntry`] carries the input for creating a
//! record while [`UrlEntry`] is the stored result.

pub mod url_entry;

pub use url_entry::{ANONYMOUS_OWNER, NewUrlEntry, UrlEntry};
