#![allow(clippy::async_fn_in_trait)]
pub mod channel;
pub mod common;
pub mod handler;
pub mod rest;
pub mod server;
pub mod sys;
pub mod traits;

pub use server::server::server_start;
