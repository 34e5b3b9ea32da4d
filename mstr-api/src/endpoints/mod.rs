//! API endpoint modules organized by resource category.
//!
//! Each module provides typed methods for a group of related server
//! endpoints. Every method issues exactly one HTTP request, routes the
//! response through the response handler, and returns the validated raw
//! response; parsing is left to the hydration layer.

pub mod dossiers;
pub mod library;
pub mod projects;
pub mod usergroups;
