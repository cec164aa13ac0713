//! Machine opponent: depth-limited minimax with alpha-beta pruning over
//! cloned game states.

mod search;

pub use search::{search, Outlook, SearchResult};
