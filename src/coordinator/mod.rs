//! 协调者 - 路由查询、调度专家、组装回答

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::llm::{NarrationRequest, Narrator};
use crate::memory::{InteractionLog, InteractionRecord};
use crate::specialists::{Capability, Specialist, SpecialistProfile, SpecialistRegistry};
use crate::types::{Domain, RetrievalResult, RoutingDecision};

pub mod composer;
pub mod context;
pub mod rate_limit;
pub mod router;
pub mod session;
pub mod trace;
pub mod workflow;

pub use composer::SpecialistOutcome;
pub use context::MaitreContext;
pub use rate_limit::{FailureOutcome, RateLimitClassifier};
pub use session::SessionContext;
pub use trace::{RetrievalTrace, TraceRecord};

const MULTI_AGENT: &str = "multiple_specialists";
const MULTI_REASON: &str = "complex_multi_domain_query";

/// 回答状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyStatus {
    /// 已由专家回答
    Answered,
    /// 通用查询，返回澄清引导
    Guidance,
    /// 上游限流，建议在 `retry_after` 秒后重试
    RateLimited { retry_after: u64 },
    /// 其他失败，文本为礼貌的说明
    Failed,
}

impl ReplyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyStatus::Answered => "answered",
            ReplyStatus::Guidance => "guidance",
            ReplyStatus::RateLimited { .. } => "rate_limited",
            ReplyStatus::Failed => "failed",
        }
    }
}

/// 协调者的最终回答
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: ReplyStatus,
    pub decision: RoutingDecision,
    /// 可见文本，不含追踪信息
    pub text: String,
    pub outcomes: Vec<SpecialistOutcome>,
    pub trace: Option<TraceRecord>,
}

impl Reply {
    pub fn domain(&self) -> Domain {
        self.decision.domain
    }

    /// 输出文本；启用追踪时在可见文本之后附加隐藏片段
    pub fn render(&self) -> String {
        let Some(trace) = &self.trace else {
            return self.text.clone();
        };
        match trace.to_span() {
            Ok(span) => format!("{}\n{}", self.text, span),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize trace record");
                self.text.clone()
            }
        }
    }
}

/// 数字领班：持有只读的专家集合与共享的交互日志，会话状态由调用方传入
pub struct Coordinator {
    registry: SpecialistRegistry,
    history: InteractionLog,
    narrator: Option<Arc<dyn Narrator>>,
    rate_limits: RateLimitClassifier,
    trace_enabled: bool,
    history_window: usize,
}

impl Coordinator {
    pub fn new(registry: SpecialistRegistry, history: InteractionLog) -> Self {
        Self {
            registry,
            history,
            narrator: None,
            rate_limits: RateLimitClassifier::new(),
            trace_enabled: false,
            history_window: 3,
        }
    }

    pub fn with_narrator(mut self, narrator: Arc<dyn Narrator>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace_enabled = enabled;
        self
    }

    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    pub fn registry(&self) -> &SpecialistRegistry {
        &self.registry
    }

    /// 处理一次查询：路由 → 专家检索 → 组装 → 可选的润色 → 可选的追踪信息
    pub async fn handle(&self, query: &str, session: &mut SessionContext) -> Reply {
        let decision = router::route(query);
        tracing::info!(
            session = %session.id(),
            domain = %decision.domain,
            keyword = ?decision.matched_keyword,
            "query routed"
        );
        self.history
            .append(InteractionRecord::new(query, decision.domain))
            .await;

        if !decision.requires_specialists() {
            return self.finish(ReplyStatus::Guidance, decision.intro_text.clone(), decision, Vec::new());
        }

        let mut outcomes = Vec::with_capacity(decision.specialists.len());
        let mut consulted: Vec<Arc<Specialist>> = Vec::new();
        for domain in &decision.specialists {
            let outcome = match self.registry.get(*domain) {
                Some(specialist) => {
                    consulted.push(specialist.clone());
                    SpecialistOutcome {
                        domain: *domain,
                        capability: Capability::primary(*domain),
                        result: specialist.consult(query).await,
                    }
                }
                None => SpecialistOutcome {
                    domain: *domain,
                    capability: Capability::primary(*domain),
                    result: RetrievalResult::error(
                        format!(
                            "El especialista de {} no está disponible en este momento.",
                            domain
                        ),
                        query,
                    ),
                },
            };
            tracing::debug!(domain = %domain, status = %outcome.result.status(), "specialist consulted");
            outcomes.push(outcome);
        }

        self.record_session(&decision, query, session);

        let draft = composer::compose(&decision, &outcomes);
        let (status, text) = self.narrate(query, &draft, &decision, &consulted).await;

        self.finish(status, text, decision, outcomes)
    }

    /// 当前会话的上下文摘要，附带交互日志中最近的查询
    pub async fn conversation_context(&self, session: &SessionContext) -> String {
        let recent = self.history.recent(self.history_window).await;
        session.conversation_summary(self.history_window, &recent)
    }

    async fn narrate(
        &self,
        query: &str,
        draft: &str,
        decision: &RoutingDecision,
        consulted: &[Arc<Specialist>],
    ) -> (ReplyStatus, String) {
        let Some(narrator) = &self.narrator else {
            return (ReplyStatus::Answered, draft.to_string());
        };
        if consulted.is_empty() {
            return (ReplyStatus::Answered, draft.to_string());
        }

        let request = NarrationRequest {
            query,
            draft,
            decision,
        };
        match narrator.narrate(&request, consulted).await {
            Ok(narrated) if !narrated.trim().is_empty() => (
                ReplyStatus::Answered,
                format!("{}{}", decision.intro_text, narrated.trim()),
            ),
            Ok(_) => (ReplyStatus::Answered, draft.to_string()),
            Err(e) => {
                let error = format!("{:#}", e);
                match self.rate_limits.classify(&error) {
                    FailureOutcome::RateLimited {
                        message,
                        retry_after,
                    } => {
                        tracing::warn!(error = %error, retry_after, "upstream rate limit");
                        (ReplyStatus::RateLimited { retry_after }, message)
                    }
                    FailureOutcome::Error { message } => {
                        tracing::error!(error = %error, "narration failed");
                        (ReplyStatus::Failed, message)
                    }
                }
            }
        }
    }

    fn record_session(&self, decision: &RoutingDecision, query: &str, session: &mut SessionContext) {
        match SpecialistProfile::for_domain(decision.domain) {
            Some(profile) => {
                session.record_interaction(profile.agent_name, query, profile.interaction_reason)
            }
            None => session.record_interaction(MULTI_AGENT, query, MULTI_REASON),
        }
    }

    fn finish(
        &self,
        status: ReplyStatus,
        text: String,
        decision: RoutingDecision,
        outcomes: Vec<SpecialistOutcome>,
    ) -> Reply {
        let trace = self
            .trace_enabled
            .then(|| composer::trace_record(&decision, &outcomes, status.as_str()));

        Reply {
            status,
            decision,
            text,
            outcomes,
            trace,
        }
    }
}
