//! 메모리 기반 성능 엔트리 공급원.
//!
//! 서버에는 브라우저의 PerformanceObserver가 없으므로, 클라이언트가 비컨으로
//! 보낸 원시 엔트리를 버퍼에 쌓고 등록된 관찰자에게 전달한다.
//! 버퍼는 유형별로 지표 계산에 필요한 만큼만 보관한다.

use harisnews_core::error::CoreError;
use harisnews_core::models::entry::{EntryType, PerformanceEntry};
use harisnews_core::ports::performance::{
    EntryCallback, ObserverFlow, ObserverId, PerformanceEntrySource,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, warn};

/// layout-shift 재전달용 보관 한도 (초과 시 가장 오래된 것부터 제거)
pub const LAYOUT_SHIFT_HISTORY: usize = 256;

/// paint 보관 한도 (이름별 첫 엔트리)
const PAINT_HISTORY: usize = 8;

type Target = (ObserverId, Arc<Mutex<EntryCallback>>);

struct Observer {
    id: ObserverId,
    entry_type: EntryType,
    callback: Arc<Mutex<EntryCallback>>,
}

#[derive(Default)]
struct SourceState {
    navigation: Option<Value>,
    buffer: HashMap<EntryType, VecDeque<Value>>,
    observers: Vec<Observer>,
    next_id: u64,
}

/// 엔트리 전달 결과
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// 버퍼에 기록된 엔트리 수
    pub accepted: usize,
    /// 알 수 없거나 미지원 유형이라 버린 엔트리 수
    pub ignored: usize,
}

/// 비컨 기반 엔트리 공급원
///
/// 지원 유형 집합을 지정할 수 있으며, 미지원 유형 관찰 요청은
/// `CoreError::Unsupported`로 거부한다.
pub struct BufferedEntrySource {
    supported: HashSet<EntryType>,
    state: Mutex<SourceState>,
}

impl BufferedEntrySource {
    /// 모든 엔트리 유형을 지원하는 공급원
    pub fn new() -> Self {
        Self::with_supported([
            EntryType::Navigation,
            EntryType::Paint,
            EntryType::LargestContentfulPaint,
            EntryType::FirstInput,
            EntryType::LayoutShift,
        ])
    }

    /// 지원 유형을 제한한 공급원 (예: first-input 미지원 브라우저)
    pub fn with_supported(types: impl IntoIterator<Item = EntryType>) -> Self {
        Self {
            supported: types.into_iter().collect(),
            state: Mutex::new(SourceState::default()),
        }
    }

    /// 지원 여부
    pub fn supports(&self, entry_type: EntryType) -> bool {
        self.supported.contains(&entry_type)
    }

    /// 내비게이션 엔트리 기록 (문서 로드당 하나, 이후 값은 무시)
    ///
    /// 디코딩에 실패한 엔트리는 기록하지 않으므로 뒤이어 오는 정상 엔트리가 자리를 차지한다.
    pub fn set_navigation(&self, entry: Value) -> bool {
        if !self.supports(EntryType::Navigation) {
            return false;
        }
        match PerformanceEntry::decode(&entry) {
            Ok(PerformanceEntry::Navigation { .. }) => {}
            Ok(other) => {
                warn!("내비게이션이 아닌 엔트리 무시: {}", other.entry_type());
                return false;
            }
            Err(e) => {
                warn!("내비게이션 엔트리 디코딩 실패, 무시: {e}");
                return false;
            }
        }
        let mut state = self.state.lock();
        if state.navigation.is_some() {
            debug!("내비게이션 엔트리 중복 수신, 무시");
            return false;
        }
        state.navigation = Some(entry);
        true
    }

    /// 원시 엔트리 배치를 버퍼링하고 관찰자에게 전달
    ///
    /// 같은 유형의 엔트리는 수신 순서대로 한 번에 전달한다.
    pub fn dispatch(&self, entries: Vec<Value>) -> DispatchSummary {
        let mut summary = DispatchSummary::default();
        let mut groups: Vec<(EntryType, Vec<Value>)> = Vec::new();

        for raw in entries {
            let entry_type = match EntryType::of_raw(&raw) {
                Some(t) if self.supports(t) => t,
                Some(t) => {
                    debug!("미지원 엔트리 유형 무시: {t}");
                    summary.ignored += 1;
                    continue;
                }
                None => {
                    warn!("entryType을 알 수 없는 엔트리 무시");
                    summary.ignored += 1;
                    continue;
                }
            };

            if entry_type == EntryType::Navigation {
                self.set_navigation(raw.clone());
            }
            summary.accepted += 1;
            match groups.iter_mut().find(|(t, _)| *t == entry_type) {
                Some((_, batch)) => batch.push(raw),
                None => groups.push((entry_type, vec![raw])),
            }
        }

        // 버퍼 기록과 전달 대상 선정을 한 잠금 안에서 처리해야
        // 동시에 등록되는 buffered 관찰자가 같은 엔트리를 두 번 받지 않는다
        let deliveries: Vec<(Vec<Value>, Vec<Target>)> = {
            let mut state = self.state.lock();
            groups
                .into_iter()
                .map(|(entry_type, batch)| {
                    let buffer = state.buffer.entry(entry_type).or_default();
                    for raw in &batch {
                        retain(buffer, raw);
                    }
                    let targets = state
                        .observers
                        .iter()
                        .filter(|o| o.entry_type == entry_type)
                        .map(|o| (o.id, Arc::clone(&o.callback)))
                        .collect();
                    (batch, targets)
                })
                .collect()
        };

        for (batch, targets) in deliveries {
            for (id, callback) in targets {
                self.invoke(id, &callback, &batch);
            }
        }
        summary
    }

    /// 재전달용으로 보관 중인 엔트리 수
    pub fn buffered_count(&self, entry_type: EntryType) -> usize {
        self.state
            .lock()
            .buffer
            .get(&entry_type)
            .map_or(0, VecDeque::len)
    }

    /// 활성 관찰자 수
    pub fn observer_count(&self) -> usize {
        self.state.lock().observers.len()
    }

    /// 특정 유형의 활성 관찰자 수
    pub fn observer_count_for(&self, entry_type: EntryType) -> usize {
        self.state
            .lock()
            .observers
            .iter()
            .filter(|o| o.entry_type == entry_type)
            .count()
    }

    /// 콜백 호출: 호출 직전 해제된 관찰자는 건너뛴다
    fn invoke(&self, id: ObserverId, callback: &Mutex<EntryCallback>, batch: &[Value]) {
        if !self.is_live(id) {
            return;
        }
        let flow = {
            let mut guard = callback.lock();
            (guard.as_mut())(batch)
        };
        if flow == ObserverFlow::Disconnect {
            self.disconnect(id);
        }
    }

    fn is_live(&self, id: ObserverId) -> bool {
        self.state.lock().observers.iter().any(|o| o.id == id)
    }
}

/// 버퍼 보관 규칙
///
/// - navigation / first-input: 첫 엔트리만
/// - paint: 이름별 첫 엔트리
/// - largest-contentful-paint: 최신 후보만
/// - layout-shift: 최근 `LAYOUT_SHIFT_HISTORY`건
///
/// 디코딩되지 않는 엔트리는 보관하지 않는다 (실시간 전달은 그대로).
fn retain(buffer: &mut VecDeque<Value>, raw: &Value) {
    let entry = match PerformanceEntry::decode(raw) {
        Ok(entry) => entry,
        Err(e) => {
            debug!("잘못된 엔트리는 버퍼에 보관하지 않음: {e}");
            return;
        }
    };
    match entry {
        PerformanceEntry::Navigation { .. } | PerformanceEntry::FirstInput { .. } => {
            if buffer.is_empty() {
                buffer.push_back(raw.clone());
            }
        }
        PerformanceEntry::Paint { name, .. } => {
            let seen = buffer
                .iter()
                .any(|b| b.get("name").and_then(Value::as_str) == Some(name.as_str()));
            if !seen && buffer.len() < PAINT_HISTORY {
                buffer.push_back(raw.clone());
            }
        }
        PerformanceEntry::LargestContentfulPaint { .. } => {
            buffer.clear();
            buffer.push_back(raw.clone());
        }
        PerformanceEntry::LayoutShift { .. } => {
            if buffer.len() >= LAYOUT_SHIFT_HISTORY {
                buffer.pop_front();
            }
            buffer.push_back(raw.clone());
        }
    }
}

impl Default for BufferedEntrySource {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceEntrySource for BufferedEntrySource {
    fn navigation_entry(&self) -> Option<Value> {
        self.state.lock().navigation.clone()
    }

    fn observe(
        &self,
        entry_type: EntryType,
        buffered: bool,
        callback: EntryCallback,
    ) -> Result<ObserverId, CoreError> {
        if !self.supports(entry_type) {
            return Err(CoreError::Unsupported(format!(
                "엔트리 유형 {entry_type} 관찰"
            )));
        }

        let callback = Arc::new(Mutex::new(callback));
        let (id, replay) = {
            let mut state = self.state.lock();
            state.next_id += 1;
            let id = ObserverId(state.next_id);
            state.observers.push(Observer {
                id,
                entry_type,
                callback: Arc::clone(&callback),
            });
            let replay = if buffered {
                state
                    .buffer
                    .get(&entry_type)
                    .map(|b| b.iter().cloned().collect())
                    .unwrap_or_default()
            } else {
                Vec::new()
            };
            (id, replay)
        };

        if !replay.is_empty() {
            debug!("버퍼된 {entry_type} 엔트리 {}건 재전달", replay.len());
            self.invoke(id, &callback, &replay);
        }
        Ok(id)
    }

    fn disconnect(&self, id: ObserverId) {
        self.state.lock().observers.retain(|o| o.id != id);
    }
}

/// 성능 계측을 전혀 지원하지 않는 환경 (서버 렌더링 컨텍스트 등)
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedEntrySource;

impl PerformanceEntrySource for UnsupportedEntrySource {
    fn navigation_entry(&self) -> Option<Value> {
        None
    }

    fn observe(
        &self,
        entry_type: EntryType,
        _buffered: bool,
        _callback: EntryCallback,
    ) -> Result<ObserverId, CoreError> {
        Err(CoreError::Unsupported(format!(
            "PerformanceObserver 없음 ({entry_type})"
        )))
    }

    fn disconnect(&self, _id: ObserverId) {}
}
