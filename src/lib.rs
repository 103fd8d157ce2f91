pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod ranking;
pub mod render;
pub mod state;
pub mod validation;
