//! Request handlers.

pub mod health;
pub mod images;
pub mod videos;
