//! CLI command implementations

mod browse;
mod recent;
mod search;
mod show;
mod suggest;

pub use browse::browse;
pub use recent::recent;
pub use search::search;
pub use show::show;
pub use suggest::suggest;
