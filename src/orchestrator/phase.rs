//! 运行阶段状态机
//!
//! ```text
//! START ──Gatherer──► GATHERED ──Synthesizer──► SYNTHESIZED ──► DONE
//!   │                    │                          │
//!   └────────────────────┴───────── 错误 ───────────┴──► FAILED
//! ```

use crate::workflow::StageKind;

/// 一次运行所处的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    Gathered,
    Synthesized,
    Done,
    Failed,
}

impl Phase {
    /// 当前阶段之后成功执行 `stage` 会进入的阶段；顺序不合法时返回 `None`
    pub fn after(self, stage: StageKind) -> Option<Phase> {
        match (self, stage) {
            (Phase::Start, StageKind::Gatherer) => Some(Phase::Gathered),
            (Phase::Gathered, StageKind::Synthesizer) => Some(Phase::Synthesized),
            _ => None,
        }
    }

    /// 到达终点后的阶段
    pub fn finish(self) -> Option<Phase> {
        match self {
            Phase::Synthesized => Some(Phase::Done),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Done | Phase::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let gathered = Phase::Start.after(StageKind::Gatherer).unwrap();
        let synthesized = gathered.after(StageKind::Synthesizer).unwrap();
        assert_eq!(synthesized, Phase::Synthesized);
        assert_eq!(synthesized.finish(), Some(Phase::Done));
        assert!(Phase::Done.is_terminal());
    }

    #[test]
    fn test_out_of_order_transitions_are_rejected() {
        assert_eq!(Phase::Start.after(StageKind::Synthesizer), None);
        assert_eq!(Phase::Gathered.after(StageKind::Gatherer), None);
        assert_eq!(Phase::Failed.after(StageKind::Gatherer), None);
        assert_eq!(Phase::Gathered.finish(), None);
        assert!(!Phase::Gathered.is_terminal());
    }
}
