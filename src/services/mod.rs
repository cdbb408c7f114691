// Service module exports

pub mod drag;
pub mod planner;
pub mod recurrence;
pub mod settings;
pub mod store;
pub mod timeline;
