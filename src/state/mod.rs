//! # Runtime metadata.
//!
//! Values the runtime carries for the embedder without interpreting them:
//! - [`Identity`] - application identity (id, name, version, metadata, endpoints)
//! - [`Registrar`] - service-discovery handle
//! - [`Scene`] - deployment scene
//! - [`RuntimeState`] - the write-once record built by [`Runtime::start`](crate::Runtime::start)

mod identity;
mod registrar;
mod runtime_state;
mod scene;

pub use identity::Identity;
pub use registrar::Registrar;
pub use runtime_state::RuntimeState;
pub use scene::{ParseSceneError, Scene};
