//! Behaviors attached to the server-rendered page

pub mod confirm;
pub mod details;
pub mod scans;
pub mod target;
pub mod widgets;
