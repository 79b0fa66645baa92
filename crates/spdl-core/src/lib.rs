pub mod config;
pub mod logging;

pub mod cookies;
pub mod engine;
pub mod har;
pub mod manifest;
pub mod outtmpl;
pub mod progress;
pub mod tools;
