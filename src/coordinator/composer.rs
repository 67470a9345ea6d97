//! 回答组装：把路由决策与各专家的检索结果合成为最终文本

use serde::{Deserialize, Serialize};

use super::trace::{RetrievalTrace, TraceRecord};
use crate::specialists::{Capability, SpecialistProfile};
use crate::types::{Domain, RetrievalResult, RetrievalStatus, RoutingDecision};

const CLOSING: &str = "¿Hay algún aspecto adicional en el que pueda asistirle?";

const MULTI_HEADER: &str = "=== EXPERIENCIA GASTRONÓMICA COMPLETA ===";

const SYNTHESIS: &str = "Como su Maître Digital, he coordinado esta información para garantizar una experiencia gastronómica excepcional y completa. ¿Hay algún aspecto adicional en el que pueda asistirle?";

const COORDINATOR_AGENT: &str = "gastronomy_coordinator";

/// 某位专家对查询的检索结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialistOutcome {
    pub domain: Domain,
    /// 实际调用的能力；领域没有对应能力时为 None
    pub capability: Option<Capability>,
    pub result: RetrievalResult,
}

/// 组装可见回答
///
/// 单一领域：开场白、专家引导句、检索内容、结束语；
/// 多领域：开场白、标题、按专家分节的内容、总结句；通用：路由的澄清文本。
pub fn compose(decision: &RoutingDecision, outcomes: &[SpecialistOutcome]) -> String {
    match (decision.domain, outcomes) {
        (Domain::General, _) | (_, []) => decision.intro_text.clone(),
        (Domain::Multi, _) => compose_multi(decision, outcomes),
        (_, [outcome, ..]) => compose_single(decision, outcome),
    }
}

fn compose_single(decision: &RoutingDecision, outcome: &SpecialistOutcome) -> String {
    let mut text = decision.intro_text.clone();
    if outcome.result.is_success()
        && let Some(profile) = SpecialistProfile::for_domain(outcome.domain)
    {
        text.push_str(profile.framing);
        text.push_str("\n\n");
    }
    text.push_str(outcome.result.context());
    text.push_str("\n\n");
    text.push_str(CLOSING);
    text
}

fn compose_multi(decision: &RoutingDecision, outcomes: &[SpecialistOutcome]) -> String {
    let sections = outcomes
        .iter()
        .map(|outcome| format!("{}\n{}", section_title(outcome), outcome.result.context()))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "{}{}\n\n{}\n\n{}",
        decision.intro_text, MULTI_HEADER, sections, SYNTHESIS
    )
}

fn section_title(outcome: &SpecialistOutcome) -> String {
    let title = SpecialistProfile::for_domain(outcome.domain)
        .map(|p| p.section_title.to_string())
        .unwrap_or_else(|| outcome.domain.to_string().to_uppercase());

    match outcome.result.status() {
        RetrievalStatus::Success => title,
        RetrievalStatus::Partial => format!("{} (sin información específica)", title),
        RetrievalStatus::Error => format!("{} (no disponible)", title),
    }
}

/// 各专家原始检索内容的拼接，供追踪信息使用
pub fn raw_context(outcomes: &[SpecialistOutcome]) -> String {
    outcomes
        .iter()
        .map(|o| o.result.context())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// 根据路由与检索结果生成追踪记录
pub fn trace_record(
    decision: &RoutingDecision,
    outcomes: &[SpecialistOutcome],
    status: &str,
) -> TraceRecord {
    let agent_name = match decision.domain {
        Domain::Wine | Domain::Culinary | Domain::Nutrition => {
            SpecialistProfile::for_domain(decision.domain)
                .map(|p| p.agent_name)
                .unwrap_or(COORDINATOR_AGENT)
        }
        Domain::Multi | Domain::General => COORDINATOR_AGENT,
    };

    let source = if outcomes.iter().any(|o| o.result.is_success()) {
        "RAG"
    } else {
        "LLM"
    };

    TraceRecord {
        agent_name: agent_name.to_string(),
        domains: decision.specialists.clone(),
        tools_used: outcomes
            .iter()
            .filter_map(|o| o.capability.map(|c| c.id().to_string()))
            .collect(),
        retrievals: outcomes
            .iter()
            .map(|o| RetrievalTrace {
                domain: o.domain,
                tool: o.capability.map(|c| c.id().to_string()),
                status: o.result.status(),
            })
            .collect(),
        source: source.to_string(),
        status: status.to_string(),
        rag_context: raw_context(outcomes),
    }
}
