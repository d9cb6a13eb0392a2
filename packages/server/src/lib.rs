// Mission Control - Worker Core
//
// This crate provides the background worker that keeps the Mission Control
// runner cron job registered in the OpenClaw gateway, plus the data
// migration tooling for one-off database transformations.

pub mod config;
pub mod data_migrations;
pub mod kernel;

pub use config::*;
