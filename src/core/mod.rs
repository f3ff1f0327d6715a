//! Core library components.

pub mod config;
pub mod constants;
pub mod inject;
pub mod pipeline;
pub mod props;
pub mod request;
pub mod resolver;
pub mod store;
