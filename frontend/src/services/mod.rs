//! Backend services.
//!
//! # Services
//!
//! - [`api`] - the kiosk catalogue API: three list routes, three create routes

pub mod api;

pub use api::*;
