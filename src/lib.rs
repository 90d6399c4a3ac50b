//! vestibule: cookie-session authentication gate and authenticated REST
//! client for small axum web services.

pub mod client;
pub mod gate;
pub mod server;
