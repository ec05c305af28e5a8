mod common;
mod feed;
mod reactions;

pub use common::{health, root};
pub use feed::{get_authors, get_feed, get_post_by_id, get_sources, get_timestamp_offset};
pub use reactions::{clear_reactions, react_to_post};
