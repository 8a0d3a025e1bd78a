//! viewerscan: tracks who has been viewing a forum, most recent last.
//!
//! The library holds the visitor tracker plus the fetch, render and polling
//! pieces the binary wires together; integration tests use it directly.

pub mod app;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;
