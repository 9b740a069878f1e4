pub mod config;
pub mod error;
pub mod event;
pub mod expiration;
pub mod link;
pub mod response;
pub mod services;
pub mod webhook;
