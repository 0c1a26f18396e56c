//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Pages are static screens over mock data. Each mounts its own
//! `DarkModeToggle` and delegates theme-aware rendering to `components`.

pub mod dashboard;
pub mod login;
pub mod not_found;
