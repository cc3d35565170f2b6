pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod job;
pub mod notify;
pub mod report;
pub mod util;
