//! Library crate for netsec-scan: nmap profiles, output statistics and report writers.
pub mod config;
pub mod console;
pub mod environment;
pub mod error;
pub mod html;
pub mod logging;
pub mod profiles;
pub mod render;
pub mod report;
pub mod scanner;
pub mod stats;
pub mod types;
