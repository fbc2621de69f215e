//! Storage backends. Only the in-memory one lives here; relational
//! backends implement the same contracts elsewhere.

mod memory;

pub use memory::MemoryStore;
