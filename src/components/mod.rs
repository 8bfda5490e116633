//! Reusable view components.

pub mod network_view;
