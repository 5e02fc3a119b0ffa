//! Session Store Adapters
//!
//! - **InMemorySessionStore** - sessions held in process memory

mod in_memory;

pub use in_memory::InMemorySessionStore;
