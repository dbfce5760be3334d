pub mod config;
pub mod extract;
pub mod report;
pub mod run;
pub mod scan;
