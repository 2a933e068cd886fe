//! Command handlers

pub mod config;
pub mod file;
pub mod pick;
pub mod serve;
pub mod system;
