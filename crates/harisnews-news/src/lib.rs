//! # harisnews-news
//!
//! 뉴스 피드 어댑터.
//! News API에서 헤드라인을 가져와 캐시하고, 실패하면 고정 폴백 기사로 대체한다.

pub mod api_client;
pub mod fallback;
pub mod feed;

pub use api_client::NewsApiClient;
pub use feed::{FeedSnapshot, NewsFeed};
