pub mod data_manager;
pub mod omdb;
