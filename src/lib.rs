pub mod actions;
pub mod api;
pub mod app;
pub mod auth;
pub mod comments;
pub mod config;
pub mod error;
pub mod favorites;
pub mod items;
pub mod mock_server;
pub mod orders;
pub mod store;
pub mod tasks;
pub mod views;
