//! Back-office data access.
//!
//! This module provides the [`AdminDataSource`] trait over the hosted
//! tables, its REST and in-memory implementations, and the [`AdminStore`]
//! that holds the current snapshot and applies writes.

mod admin_store;
mod memory;
mod rest;
mod source;

pub use admin_store::AdminStore;
pub use memory::InMemorySource;
pub use rest::RestSource;
pub use source::AdminDataSource;
