//! Application composition: persistence of coordinator state and the
//! interactive runtime loop.

/// Narrow-view persistence of coordinator state.
pub mod persist;
/// Event loop wiring input, coordinator, provider, and persistence.
pub mod runtime;

pub use runtime::run;
