//! 工作流图
//!
//! 用命名节点、入口和无条件边描述一个线性的有向无环流程，
//! `compile` 时完成全部结构校验，运行时只按顺序执行。

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::error::WorkflowError;
use crate::models::WorkflowState;
use crate::orchestrator::phase::Phase;
use crate::workflow::Stage;

/// 终点节点名
pub const END: &str = "__end__";

/// 工作流构建器
#[derive(Default)]
pub struct WorkflowBuilder {
    nodes: Vec<(String, Arc<dyn Stage>)>,
    edges: Vec<(String, String)>,
    entry: Option<String>,
}

impl WorkflowBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, name: impl Into<String>, stage: Arc<dyn Stage>) -> &mut Self {
        self.nodes.push((name.into(), stage));
        self
    }

    pub fn set_entry_point(&mut self, name: impl Into<String>) -> &mut Self {
        self.entry = Some(name.into());
        self
    }

    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.edges.push((from.into(), to.into()));
        self
    }

    /// 校验图结构并生成可执行的工作流
    pub fn compile(self) -> Result<CompiledWorkflow, WorkflowError> {
        let invalid = |msg: String| WorkflowError::InvalidGraph(msg);

        let mut stages: HashMap<String, Arc<dyn Stage>> = HashMap::new();
        for (name, stage) in self.nodes {
            if name == END {
                return Err(invalid(format!("节点名 {} 是保留名", END)));
            }
            if stages.insert(name.clone(), stage).is_some() {
                return Err(invalid(format!("重复的节点: {}", name)));
            }
        }

        let entry = self.entry.ok_or_else(|| invalid("未设置入口节点".to_string()))?;
        if !stages.contains_key(&entry) {
            return Err(invalid(format!("入口节点不存在: {}", entry)));
        }

        let mut next: HashMap<String, String> = HashMap::new();
        for (from, to) in self.edges {
            if !stages.contains_key(&from) {
                return Err(invalid(format!("边的起点不存在: {}", from)));
            }
            if to != END && !stages.contains_key(&to) {
                return Err(invalid(format!("边的终点不存在: {}", to)));
            }
            if next.insert(from.clone(), to).is_some() {
                return Err(invalid(format!("节点 {} 有多条出边", from)));
            }
        }

        let mut steps = Vec::with_capacity(stages.len());
        let mut visited = HashSet::new();
        let mut current = entry;
        loop {
            if !visited.insert(current.clone()) {
                return Err(invalid(format!("存在环: 再次到达 {}", current)));
            }
            let following = next
                .get(&current)
                .cloned()
                .ok_or_else(|| invalid(format!("节点 {} 没有出边", current)))?;
            let stage = stages[&current].clone();
            steps.push((current, stage));
            if following == END {
                break;
            }
            current = following;
        }

        if visited.len() != stages.len() {
            let mut unreachable: Vec<&String> =
                stages.keys().filter(|n| !visited.contains(*n)).collect();
            unreachable.sort();
            return Err(invalid(format!("存在无法到达的节点: {:?}", unreachable)));
        }

        Ok(CompiledWorkflow { steps })
    }
}

/// 编译后的工作流
pub struct CompiledWorkflow {
    steps: Vec<(String, Arc<dyn Stage>)>,
}

impl CompiledWorkflow {
    /// 按执行顺序排列的节点名
    pub fn node_names(&self) -> Vec<&str> {
        self.steps.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// 用初始状态运行一次，返回合并后的最终状态
    ///
    /// 任一阶段失败即终止，错误原样返回。
    pub async fn invoke(&self, initial: WorkflowState) -> Result<WorkflowState, WorkflowError> {
        let mut state = initial;
        let mut phase = Phase::Start;

        for (name, stage) in &self.steps {
            let kind = stage.kind();
            let next_phase = phase
                .after(kind)
                .ok_or_else(|| WorkflowError::InvalidTransition {
                    from: phase,
                    stage: kind.name().to_string(),
                })?;

            info!("▶ 执行节点 {}", name);
            match stage.run(&state).await {
                Ok(update) => {
                    state.merge(update);
                    phase = next_phase;
                    info!("✓ 节点 {} 完成，进入 {:?}", name, phase);
                }
                Err(e) => {
                    phase = Phase::Failed;
                    error!("❌ 节点 {} 执行失败 ({:?}): {}", name, phase, e);
                    return Err(e);
                }
            }
        }

        phase = phase.finish().ok_or(WorkflowError::InvalidTransition {
            from: phase,
            stage: END.to_string(),
        })?;
        debug_assert!(phase.is_terminal());
        debug!("工作流结束: {:?}", phase);

        Ok(state)
    }
}
