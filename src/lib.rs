//! stride — a session navigator for task queues: persisted ordered id
//! lists, prev/next stepping under an explicit edge policy, and a tracked
//! route (path + query parameters) standing in for the wizard URL.

pub mod cli;
pub mod io;
pub mod model;
pub mod ops;
