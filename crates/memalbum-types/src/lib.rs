//! Wire types shared by the HTTP handlers and their tests.

pub mod api;
pub mod models;
