//! 성능 계측 엔트리 모델.
//!
//! 호스트 환경이 전달하는 느슨한 형태(JSON)의 성능 엔트리를
//! `entryType` 태그 기준으로 검증된 타입으로 디코딩한다.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::error::CoreError;

/// 관찰 가능한 엔트리 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryType {
    /// 내비게이션 타이밍 (문서 로드당 1개)
    Navigation,
    /// 페인트 타이밍 (first-paint, first-contentful-paint)
    Paint,
    /// 최대 콘텐츠 페인트 후보
    LargestContentfulPaint,
    /// 첫 사용자 입력
    FirstInput,
    /// 레이아웃 이동
    LayoutShift,
}

impl EntryType {
    /// 브라우저 표기 문자열
    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::Navigation => "navigation",
            EntryType::Paint => "paint",
            EntryType::LargestContentfulPaint => "largest-contentful-paint",
            EntryType::FirstInput => "first-input",
            EntryType::LayoutShift => "layout-shift",
        }
    }

    /// 원시 엔트리의 `entryType` 필드 조회
    pub fn of_raw(raw: &Value) -> Option<Self> {
        raw.get("entryType")?.as_str()?.parse().ok()
    }
}

impl FromStr for EntryType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "navigation" => Ok(EntryType::Navigation),
            "paint" => Ok(EntryType::Paint),
            "largest-contentful-paint" => Ok(EntryType::LargestContentfulPaint),
            "first-input" => Ok(EntryType::FirstInput),
            "layout-shift" => Ok(EntryType::LayoutShift),
            other => Err(CoreError::Unsupported(format!("엔트리 유형 {other}"))),
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// FCP로 인정되는 paint 엔트리 이름
pub const FIRST_CONTENTFUL_PAINT: &str = "first-contentful-paint";

/// 검증된 성능 엔트리
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entryType")]
pub enum PerformanceEntry {
    /// 내비게이션 타이밍
    #[serde(rename = "navigation", rename_all = "camelCase")]
    Navigation {
        /// 첫 응답 바이트 시각 (ms)
        response_start: f64,
    },
    /// 페인트 타이밍
    #[serde(rename = "paint", rename_all = "camelCase")]
    Paint {
        /// 페인트 이름
        name: String,
        /// 발생 시각 (ms)
        start_time: f64,
    },
    /// LCP 후보
    #[serde(rename = "largest-contentful-paint", rename_all = "camelCase")]
    LargestContentfulPaint {
        /// 렌더 시각 (ms)
        start_time: f64,
    },
    /// 첫 입력
    #[serde(rename = "first-input", rename_all = "camelCase")]
    FirstInput {
        /// 입력 발생 시각 (ms)
        start_time: f64,
        /// 핸들러 처리 시작 시각 (ms)
        processing_start: f64,
    },
    /// 레이아웃 이동
    #[serde(rename = "layout-shift", rename_all = "camelCase")]
    LayoutShift {
        /// 발생 시각 (ms)
        start_time: f64,
        /// 이동 점수
        value: f64,
        /// 최근 사용자 입력으로 인한 이동인지
        #[serde(default)]
        had_recent_input: bool,
    },
}

impl PerformanceEntry {
    /// 원시 엔트리 디코딩 + 수치 필드 검증
    pub fn decode(raw: &Value) -> Result<Self, CoreError> {
        let entry: PerformanceEntry = serde_json::from_value(raw.clone())
            .map_err(|e| CoreError::validation("entry", e.to_string()))?;
        entry.validate()?;
        Ok(entry)
    }

    /// 엔트리 유형
    pub fn entry_type(&self) -> EntryType {
        match self {
            PerformanceEntry::Navigation { .. } => EntryType::Navigation,
            PerformanceEntry::Paint { .. } => EntryType::Paint,
            PerformanceEntry::LargestContentfulPaint { .. } => EntryType::LargestContentfulPaint,
            PerformanceEntry::FirstInput { .. } => EntryType::FirstInput,
            PerformanceEntry::LayoutShift { .. } => EntryType::LayoutShift,
        }
    }

    fn validate(&self) -> Result<(), CoreError> {
        match self {
            PerformanceEntry::Navigation { response_start } => {
                check_non_negative("responseStart", *response_start)
            }
            PerformanceEntry::Paint { start_time, .. }
            | PerformanceEntry::LargestContentfulPaint { start_time } => {
                check_non_negative("startTime", *start_time)
            }
            PerformanceEntry::FirstInput {
                start_time,
                processing_start,
            } => {
                check_non_negative("startTime", *start_time)?;
                check_non_negative("processingStart", *processing_start)
            }
            PerformanceEntry::LayoutShift {
                start_time, value, ..
            } => {
                check_non_negative("startTime", *start_time)?;
                check_non_negative("value", *value)
            }
        }
    }
}

fn check_non_negative(field: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::validation(field, "유한한 수가 아님"));
    }
    if value < 0.0 {
        return Err(CoreError::validation(field, format!("음수 값 {value}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_layout_shift() {
        let raw = json!({
            "entryType": "layout-shift",
            "name": "",
            "startTime": 512.5,
            "duration": 0,
            "value": 0.04,
            "hadRecentInput": false,
            "sources": []
        });
        let entry = PerformanceEntry::decode(&raw).unwrap();
        assert_eq!(
            entry,
            PerformanceEntry::LayoutShift {
                start_time: 512.5,
                value: 0.04,
                had_recent_input: false
            }
        );
        assert_eq!(entry.entry_type(), EntryType::LayoutShift);
    }

    #[test]
    fn decode_integer_timings() {
        let raw = json!({"entryType": "first-input", "startTime": 1000, "processingStart": 1042});
        let entry = PerformanceEntry::decode(&raw).unwrap();
        assert_eq!(
            entry,
            PerformanceEntry::FirstInput {
                start_time: 1000.0,
                processing_start: 1042.0
            }
        );
    }

    #[test]
    fn had_recent_input_defaults_false() {
        let raw = json!({"entryType": "layout-shift", "startTime": 1, "value": 0.1});
        match PerformanceEntry::decode(&raw).unwrap() {
            PerformanceEntry::LayoutShift {
                had_recent_input, ..
            } => assert!(!had_recent_input),
            other => panic!("unexpected entry: {other:?}"),
        }
    }

    #[test]
    fn rejects_missing_field() {
        let raw = json!({"entryType": "first-input", "startTime": 10});
        let err = PerformanceEntry::decode(&raw).unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
    }

    #[test]
    fn rejects_non_numeric_field() {
        let raw = json!({"entryType": "largest-contentful-paint", "startTime": "soon"});
        assert!(PerformanceEntry::decode(&raw).is_err());
    }

    #[test]
    fn rejects_negative_value() {
        let raw = json!({"entryType": "layout-shift", "startTime": 10, "value": -0.2});
        let err = PerformanceEntry::decode(&raw).unwrap_err();
        assert!(err.to_string().contains("value"));
    }

    #[test]
    fn rejects_unknown_entry_type() {
        let raw = json!({"entryType": "longtask", "startTime": 10, "duration": 80});
        assert!(PerformanceEntry::decode(&raw).is_err());
        assert_eq!(EntryType::of_raw(&raw), None);
    }

    #[test]
    fn entry_type_parse() {
        assert_eq!(
            "largest-contentful-paint".parse::<EntryType>().unwrap(),
            EntryType::LargestContentfulPaint
        );
        assert!("resource".parse::<EntryType>().is_err());
        assert_eq!(EntryType::FirstInput.to_string(), "first-input");
    }
}
