//! Rose daemon library - exposes modules for testing.

pub mod bert;
pub mod bootstrap;
pub mod classifier;
pub mod config;
pub mod embedder;
pub mod engine;
pub mod model_slot;
pub mod routes;
pub mod server;
pub mod service;
pub mod trainer;
