//! Lifecycles for landmark provider instances.
//!
//! Landmark models are expensive to build and not safe for concurrent
//! inference on one instance. Build them once at startup and hand them out
//! through one of these handles:
//! - [`SharedProvider`]: one instance, access serialized by a mutex
//! - [`ProviderPool`]: a small fixed set of instances
//!
//! A worker that owns its provider outright needs neither.

mod pool;
mod shared;

pub use pool::ProviderPool;
pub use shared::SharedProvider;
