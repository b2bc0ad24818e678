//! The higher abstractions of the program
pub mod commands;
pub mod errors;
pub mod report;
