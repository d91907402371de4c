pub mod config;
pub mod issues;
pub mod worklog;
