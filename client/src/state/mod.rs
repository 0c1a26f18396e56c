//! Shared client state reached through Leptos context.

pub mod theme;
