//! Rundeck REST API client and response parsing.

pub mod client;
pub mod parse;

pub use client::RundeckClient;
