//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each protected page wraps its feature area in a `FaultBoundary` and hands
//! the area to an `AuthGate`; the leaf content itself stays deliberately thin.

pub mod landing;
pub mod login;
pub mod profile;
pub mod settings;
pub mod wardrobe;
