//! Host-side contracts for confmap.
//!
//! The config dispatcher never mutates an application directly. It talks to
//! the traits defined here:
//! - [`Emitter`]: named event channels (`on` / `emit`)
//! - [`Target`]: the `set/get/has/del` surface shared by hosts and stores
//! - [`Host`]: the application object, optionally owning a [`Store`]
//! - [`HostPlugin`]: something a host can `use`
//!
//! [`MemoryHost`] and [`MemoryStore`] are complete in-memory implementations
//! suitable for embedding and for tests. [`EventLog`] captures events.

mod emitter;
mod host;
mod memory;
mod recorder;

pub use emitter::{Emitter, EventBus, Listener, listener};
pub use host::{FnPlugin, Host, HostPlugin, Store, Target};
pub use memory::{MemoryHost, MemoryStore};
pub use recorder::EventLog;
