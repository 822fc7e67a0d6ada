//! Python bytecode panel that follows the source editor's selection

pub mod app;
pub mod config;
pub mod model;
pub mod services;
pub mod view;
