//! Configuration and task models shared by both Lambdas

pub mod config;
pub mod models;
