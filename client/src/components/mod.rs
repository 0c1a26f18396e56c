//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the theme through `state::theme` hooks. Only
//! `DarkModeToggle` changes it; everything else is a read-only consumer.

pub mod dark_mode_toggle;
pub mod header_menu;
pub mod sidebar_nav;
pub mod stat_card;
