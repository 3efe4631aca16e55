//! External system integrations.
//!
//! - [`lucca`] - Lucca HR REST API client
//!
//! Adapters isolate third-party crates from the core: the paginator and the
//! export coordinator only see the [`lucca::ApiClient`] trait, which tests
//! replace with in-memory fakes.

pub mod lucca;
