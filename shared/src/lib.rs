//! Shared types for Course Academy
//!
//! Error types, entity records and transfer objects used by the server
//! and by anything that talks to its API.

pub mod error;
pub mod models;
pub mod util;
