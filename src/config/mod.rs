// src/config/mod.rs

pub mod app;
pub mod loader;

pub use app::{AppConfig, GeminiConfig, MetaConfig, ServerConfig};
pub use loader::load_config;
