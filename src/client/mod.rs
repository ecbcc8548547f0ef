pub mod controllers;
pub mod gui;
pub mod models;
pub mod services;
pub mod utils;
