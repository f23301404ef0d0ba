//! # harisnews-vitals
//!
//! Web Vitals 파이프라인.
//! 성능 엔트리 공급원에서 원시 엔트리를 수집해 다섯 지표(TTFB, FCP, LCP,
//! FID, CLS)로 집계하고, 페이지 뷰 단위 모니터로 소비자에게 전달한다.
//! 집계 스냅샷에서 가중 점수와 개선 권고를 산출한다.
//!
//! ## 구조
//!
//! - [`source`]: 비컨 기반 / 미지원 엔트리 공급원
//! - [`collector`]: 관찰자 등록, 엔트리 디코딩
//! - [`layout_shift`]: CLS 세션 윈도우
//! - [`aggregator`]: 스냅샷 보관, 리스너 전달
//! - [`monitor`]: 참조 카운트 기반 페이지 뷰 모니터
//! - [`scorer`] / [`advisor`] / [`presenter`]: 점수, 권고, 표시 데이터

pub mod advisor;
pub mod aggregator;
pub mod collector;
pub mod layout_shift;
pub mod monitor;
pub mod presenter;
pub mod scorer;
pub mod source;

pub use monitor::{MonitorHandle, VitalsMonitor};
pub use source::{BufferedEntrySource, UnsupportedEntrySource};
