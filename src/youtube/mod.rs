mod id;
pub mod search;
mod thumbnail;

pub use id::{video_id_from_listen, ParseError, VideoId};
pub use search::{Searcher, ToSearchQuery, VideoSearcher};
pub use thumbnail::{thumbnails, Thumbnail};
