pub mod collectors;
pub mod config;
pub mod db;
pub mod error;
pub mod menu;
pub mod models;
pub mod repository;
