//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `auth` is the plain snapshot model and its phase classification;
//! `session` owns the reactive provider that mutates it.

pub mod auth;
pub mod session;
