mod error;
pub use error::ApiError;

mod http;
pub use http::{AdminState, HttpApi};

mod service;
pub use service::{HttpService, ServiceError};

#[cfg(test)]
mod testing;
