//! # Service-discovery handle.
//!
//! The runtime stores the registrar and hands it back through
//! [`Runtime::registrar`](crate::Runtime::registrar); it never calls it.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::{error::TaskError, state::Identity};

/// Registers and deregisters a service instance with a discovery backend.
#[async_trait]
pub trait Registrar: Debug + Send + Sync + 'static {
    /// Announces `identity`.
    async fn register(&self, identity: &Identity) -> Result<(), TaskError>;

    /// Withdraws `identity`.
    async fn deregister(&self, identity: &Identity) -> Result<(), TaskError>;
}
