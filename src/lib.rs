//! Terminal CRUD screen for Rubro (category) records backed by a REST service

pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod rubro_tui;
pub mod service;
