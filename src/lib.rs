pub mod auth;
pub mod config;
pub mod domain;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
