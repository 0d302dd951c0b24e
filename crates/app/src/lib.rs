//! Patient storage, services and configuration for the clinic backend.

pub mod config;
pub mod context;
pub mod domain;
pub mod observability;
pub mod store;

#[cfg(test)]
mod test;
