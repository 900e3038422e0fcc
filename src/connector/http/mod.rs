//! Backend HTTP surface: configuration, routes and the serve loop.

pub mod config;
pub mod routes;
pub mod server;

pub use config::*;
pub use routes::*;
pub use server::*;
