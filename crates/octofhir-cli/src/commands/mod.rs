pub mod auth;
pub mod crud;
pub mod search;
pub mod server;
