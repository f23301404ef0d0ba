//! 레이아웃 이동 세션 윈도우.
//!
//! 입력과 무관한 연속 레이아웃 이동을 세션으로 묶고,
//! 지금까지 관찰된 세션 합계 중 최댓값을 CLS로 유지한다.

/// 기본 세션 간격 (ms)
pub const DEFAULT_SESSION_GAP_MS: f64 = 1_000.0;

/// CLS 세션 윈도우 상태
#[derive(Debug, Clone)]
pub struct LayoutShiftWindow {
    gap_ms: f64,
    session_value: f64,
    last_start: Option<f64>,
    max_value: f64,
}

impl LayoutShiftWindow {
    /// 세션 간격을 지정해 생성 (이 간격을 초과하면 새 세션)
    pub fn new(gap_ms: f64) -> Self {
        Self {
            gap_ms,
            session_value: 0.0,
            last_start: None,
            max_value: 0.0,
        }
    }

    /// 레이아웃 이동 하나를 반영
    ///
    /// 사용자 입력 직후 이동은 무시한다. 최대 세션 값이 커졌으면 새 값을 반환.
    /// 직전 이동보다 이른 시각의 이동(순서가 뒤바뀐 비컨)은 새 세션으로 시작한다.
    pub fn record(&mut self, start_time: f64, value: f64, had_recent_input: bool) -> Option<f64> {
        if had_recent_input {
            return None;
        }

        match self.last_start {
            Some(last) if start_time >= last && start_time - last <= self.gap_ms => {
                self.session_value += value;
            }
            _ => {
                self.session_value = value;
            }
        }
        self.last_start = Some(start_time);

        if self.session_value > self.max_value {
            self.max_value = self.session_value;
            Some(self.max_value)
        } else {
            None
        }
    }

    /// 지금까지의 최대 세션 합계
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// 현재 진행 중인 세션 합계
    pub fn session_value(&self) -> f64 {
        self.session_value
    }
}

impl Default for LayoutShiftWindow {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_GAP_MS)
    }
}
