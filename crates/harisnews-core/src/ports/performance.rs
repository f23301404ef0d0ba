//! 성능 계측 포트.
//!
//! 브라우저의 Performance API(navigation timing, PerformanceObserver)에 해당하는
//! 호스트 환경 경계. 구현: `harisnews-vitals::source`

use serde_json::Value;

use crate::error::CoreError;
use crate::models::entry::EntryType;

/// 관찰자 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub u64);

/// 콜백 처리 후 관찰 지속 여부
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverFlow {
    /// 계속 관찰
    Continue,
    /// 관찰 종료 (관찰자 해제)
    Disconnect,
}

/// 엔트리 배치 콜백: 원시(미검증) 엔트리 목록을 받는다
pub type EntryCallback = Box<dyn FnMut(&[Value]) -> ObserverFlow + Send>;

/// 성능 엔트리 공급원
///
/// 미지원 환경에서는 `observe`가 `CoreError::Unsupported`를 반환하고
/// `navigation_entry`는 `None`을 반환한다.
pub trait PerformanceEntrySource: Send + Sync {
    /// 현재 문서 로드의 내비게이션 엔트리 (아직 없거나 미지원이면 None)
    fn navigation_entry(&self) -> Option<Value>;

    /// 엔트리 유형 관찰 등록
    ///
    /// `buffered`가 true면 등록 이전에 기록된 엔트리도 즉시 전달한다.
    fn observe(
        &self,
        entry_type: EntryType,
        buffered: bool,
        callback: EntryCallback,
    ) -> Result<ObserverId, CoreError>;

    /// 관찰자 해제 (이미 해제된 ID는 무시)
    fn disconnect(&self, id: ObserverId);
}
