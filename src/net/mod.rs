//! Networking modules for the wardrobe REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles the auth-related REST calls and `types` defines the shared
//! wire schema.

pub mod api;
pub mod types;
