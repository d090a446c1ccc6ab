//! HTTP inbound adapter serving the server-rendered blog.

pub mod auth;
pub mod context;
pub mod error;
pub mod health;
pub mod hello;
pub mod posts;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

pub use context::{Authenticated, RequestContext};
pub use error::HttpResult;
