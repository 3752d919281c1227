// wayfarer - Travel-assistant orchestration over a generative text backend
// Author: kelexine (https://github.com/kelexine)

pub mod backend;
pub mod cache;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod error;
pub mod metrics;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod server;
pub mod utils;
