//! Search orchestration: debounced input, paging, and result selection

mod debounce;
mod session;

pub use debounce::Debouncer;
pub use session::{SearchSession, SearchState, EXAMPLE_QUERIES};
