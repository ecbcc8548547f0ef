pub mod action;
pub mod fetch;
