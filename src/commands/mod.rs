/// Command implementations. The CLI has a single operation: search.
pub mod search;

pub use search::run;
