//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth_gate` and `fault_boundary` are the two structural guards every
//! protected page is built from; `account_bar` is shared signed-in chrome.

pub mod account_bar;
pub mod auth_gate;
pub mod fault_boundary;
