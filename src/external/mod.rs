//! Clients for services outside this process.

pub mod client;
