// Library exports for testing and reuse

pub mod auth;
pub mod bulk;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod validation;
