pub mod api_client;
pub mod resources;
pub mod session;
pub mod workflows;
