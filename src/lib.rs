//! Build, replay, and catalog interactive step flows.
pub mod catalog;
pub mod cli;
pub mod config;
pub mod console;
pub mod executor;
pub mod flow;
pub mod samples;
pub mod session;
pub mod step;
pub mod util;
