//! LLM - 专家Agent的润色（narration）以及暴露给模型的工具

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::specialists::Specialist;
use crate::types::RoutingDecision;

pub mod client;
pub mod tools;

pub use client::LLMClient;

/// 一次润色请求
pub struct NarrationRequest<'a> {
    /// 用户原始查询
    pub query: &'a str,
    /// 由检索结果组装的草稿
    pub draft: &'a str,
    pub decision: &'a RoutingDecision,
}

/// 文本生成协作者：由专家Agent基于草稿与工具写出最终回答
///
/// 返回的错误文本会被协调者用于识别限流。
#[async_trait]
pub trait Narrator: Send + Sync {
    async fn narrate(
        &self,
        request: &NarrationRequest<'_>,
        specialists: &[Arc<Specialist>],
    ) -> Result<String>;
}
