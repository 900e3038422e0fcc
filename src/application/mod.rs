//! # Application Layer
//!
//! Interfaces at the system seams and the use cases that drive them: prompt
//! classification and request handling on the backend, conversation and
//! history state on the client.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
