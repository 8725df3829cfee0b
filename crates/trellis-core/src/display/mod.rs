//! Display formatting for domain models and operation results.
//!
//! Domain models implement `Display` directly (markdown-flavored output for
//! the terminal); newtype wrappers add formatting for collections and for
//! operation outcomes so every output surface renders the same way.
//!
//! ## Module Organization
//!
//! - [`models`]: Display implementations for domain models
//! - [`collections`]: Collection wrapper types (ProgressRecords, Badges)
//! - [`results`]: Operation result types (CreateResult, CompletionResult,
//!   DeleteResult)
//! - [`datetime`]: Date/time formatting utilities

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{Badges, ProgressRecords};
pub use datetime::LocalDateTime;
pub use results::{CompletionResult, CreateResult, DeleteResult};
