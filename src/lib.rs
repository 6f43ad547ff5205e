pub mod config;
pub mod device;
pub mod json;
pub mod markdown;
pub mod models;
pub mod parser;
pub mod reader;
