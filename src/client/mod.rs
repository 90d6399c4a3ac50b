//! Authenticated REST client with a closed, inspectable error taxonomy.

mod error;
mod request;

pub use error::ApiError;
pub use request::{Client, ClientConfig, Payload};
