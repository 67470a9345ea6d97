use serde::{Deserialize, Serialize};

use super::domain::Domain;

/// 协调者对一次查询的路由决策
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// 路由到的领域
    pub domain: Domain,
    /// 面向用户的开场白
    pub intro_text: String,
    /// 委派原因
    pub delegation_reason: String,
    /// 需要咨询的专家领域，按顺序排列；general 为空
    pub specialists: Vec<Domain>,
    /// 命中的关键词
    pub matched_keyword: Option<String>,
}

impl RoutingDecision {
    /// 是否需要咨询任何专家
    pub fn requires_specialists(&self) -> bool {
        !self.specialists.is_empty()
    }
}
