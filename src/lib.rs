//! Kiraform - Multi-tenant campaign and dynamic form backend
//!
//! Workspaces own campaigns; a campaign carries an ordered set of typed
//! fields that visitors fill in and submit. This crate holds the domain,
//! the persistence ports with their Postgres and in-memory adapters, and
//! the command/query handlers that enforce workspace membership.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
