//! 뉴스 데이터 포트.
//!
//! 구현: `harisnews-news` crate (reqwest 기반 News API 클라이언트)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::news::NewsItem;

/// 외부 뉴스 기사 공급원
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// 최신 헤드라인 조회
    async fn fetch_articles(&self) -> Result<Vec<NewsItem>, CoreError>;
}
