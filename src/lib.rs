pub mod api;
pub mod config;
pub mod dalle;
pub mod data_models;
pub mod db;
pub mod server;
