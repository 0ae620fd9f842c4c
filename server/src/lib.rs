#[macro_use]
extern crate async_trait;

pub mod analytics;
pub mod config;
pub mod database;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;
pub mod views;
