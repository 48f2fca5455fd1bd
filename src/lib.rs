//! Teacher salary engine for the LearnED tutoring platform.
//!
//! This crate computes teacher salaries from classroom enrollments and the
//! grade/board pricing table, and provides the admin back-office services
//! around it: dashboard stats, pricing management and payment review, all
//! served over an HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
