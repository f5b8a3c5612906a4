pub mod client;
pub mod error;
mod multipart;
pub mod session;
mod submit;
pub mod types;

pub use client::CatalogClient;
pub use error::ClientError;
pub use session::Session;
pub use types::Ack;
