use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::memory::InteractionRecord;

/// 一次专家咨询记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialistInteraction {
    pub agent: String,
    pub query: String,
    pub reason: String,
}

/// 单个会话的状态，由调用方持有并传给协调者
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    id: Uuid,
    preferences: BTreeMap<String, String>,
    interactions: Vec<SpecialistInteraction>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            preferences: BTreeMap::new(),
            interactions: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 记录用户偏好，同名的偏好会被覆盖
    pub fn set_preference(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.preferences.insert(key.into(), value.into());
    }

    pub fn preferences(&self) -> &BTreeMap<String, String> {
        &self.preferences
    }

    pub fn record_interaction(
        &mut self,
        agent: impl Into<String>,
        query: impl Into<String>,
        reason: impl Into<String>,
    ) {
        self.interactions.push(SpecialistInteraction {
            agent: agent.into(),
            query: query.into(),
            reason: reason.into(),
        });
    }

    pub fn interactions(&self) -> &[SpecialistInteraction] {
        &self.interactions
    }

    /// 对话上下文摘要：最近 `window` 次咨询过的专家、交互日志中的近期查询以及已知的偏好
    pub fn conversation_summary(&self, window: usize, recent: &[InteractionRecord]) -> String {
        let mut summary = String::from("=== CONTEXTO DE LA CONVERSACIÓN ===\n\n");

        if !self.interactions.is_empty() && window > 0 {
            summary.push_str("**Especialistas consultados:**\n");
            let start = self.interactions.len().saturating_sub(window);
            for interaction in &self.interactions[start..] {
                summary.push_str(&format!("- {}: {}\n", interaction.agent, interaction.reason));
            }
        }

        if !recent.is_empty() {
            summary.push_str("\n**Consultas recientes:**\n");
            for record in recent {
                summary.push_str(&format!("- [{}] {}\n", record.domain, record.query));
            }
        }

        if !self.preferences.is_empty() {
            summary.push_str("\n**Preferencias identificadas:**\n");
            for (key, value) in &self.preferences {
                summary.push_str(&format!("- {}: {}\n", key, value));
            }
        }

        summary.push_str("\nEste contexto me permite ofrecer recomendaciones más personalizadas.");
        summary
    }
}
