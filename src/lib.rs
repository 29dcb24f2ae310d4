pub mod cli;
pub mod error;
pub mod generator;
pub mod policy;
pub mod render;
