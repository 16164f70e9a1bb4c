//! NoteSync suggestion engine: debounced video search, a bounded FIFO
//! suggestion cache, and cooperative request cancellation.
//!
//! The library exposes the coordinator and its collaborators for embedding
//! and for integration tests; the binary in `main.rs` is a thin interactive
//! front end.

pub mod app;
pub mod args;
pub mod error;
pub mod sources;
pub mod state;
pub mod util;
