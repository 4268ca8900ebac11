//! HTTP request handlers
//!
//! Handlers extract the request, call one service and shape the response.

pub mod auth;
pub mod catalog;
pub mod companies;
pub mod health;
pub mod inventory;
pub mod market;
