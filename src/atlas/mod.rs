/// Board Game Atlas API layer: wire model, search client, call context.
pub mod client;
pub mod context;
pub mod errors;
pub mod game;

pub use client::{BoardgameAtlas, SEARCH_URL};
pub use context::CallContext;
pub use errors::AtlasError;
pub use game::{Game, SearchResult};
