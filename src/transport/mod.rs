pub mod client;
pub mod http;
pub mod types;

pub use client::{ChatTransport, TransportError};
pub use http::HttpTransport;
pub use types::{ChatAnswer, ChatQuery};
