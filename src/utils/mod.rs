//! Utility functions for code generation, database errors, and request handling.
//!
//! - [`code_generator`] - Short code generation and alias validation
//! - [`db_error`] - PostgreSQL constraint violation detection
//! - [`owner_cookie`] - `user_id` cookie parsing and issuing

pub mod code_generator;
pub mod db_error;
pub mod owner_cookie;
