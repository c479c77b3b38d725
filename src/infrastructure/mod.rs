// src/infrastructure/mod.rs
pub mod bootstrap;
pub mod database;
pub mod repositories;
pub mod time;
pub mod util;
