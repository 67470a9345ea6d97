//! 检索与格式化：把索引的命中结果渲染成带编号分隔符的文本块

use std::time::Duration;

use super::{KnowledgeError, KnowledgeIndex, Passage};
use crate::types::RetrievalResult;

/// 某项检索能力的文案与来源配置
#[derive(Debug, Clone, Copy)]
pub struct RetrievalProfile {
    /// 每条结果分隔符中的标签，如 `CONOCIMIENTO ENOLÓGICO`
    pub entry_label: &'static str,
    /// 成功时记录的来源
    pub source: &'static str,
    /// 知识库不可用时的说明
    pub unavailable: &'static str,
    /// 没有命中时的说明，`{query}` 会被替换为查询文本
    pub not_found: &'static str,
    /// 检索出错时的说明前缀
    pub failure: &'static str,
    /// 附在 partial/error 说明之后的建议
    pub suggestion: &'static str,
}

impl RetrievalProfile {
    fn unavailable_result(&self, query: &str) -> RetrievalResult {
        RetrievalResult::error(format!("{} {}", self.unavailable, self.suggestion), query)
    }

    fn not_found_result(&self, query: &str, query_used: &str) -> RetrievalResult {
        RetrievalResult::partial(
            format!(
                "{} {}",
                self.not_found.replace("{query}", query),
                self.suggestion
            ),
            query_used,
        )
    }

    fn failure_result(&self, error: &KnowledgeError, query: &str) -> RetrievalResult {
        RetrievalResult::error(
            format!("{}: {}. {}", self.failure, error, self.suggestion),
            query,
        )
    }
}

/// 在给定索引上检索前k段并格式化
///
/// 索引缺失返回 error，没有命中返回 partial，索引报错或超时返回 error，均不会向上抛出。
pub async fn retrieve(
    index: Option<&dyn KnowledgeIndex>,
    query: &str,
    k: usize,
    profile: &RetrievalProfile,
    timeout: Duration,
) -> RetrievalResult {
    let Some(index) = index else {
        return profile.unavailable_result(query);
    };

    match search_with_timeout(index, query, k.max(1), timeout).await {
        Ok(passages) if passages.is_empty() => profile.not_found_result(query, query),
        Ok(passages) => RetrievalResult::success(
            format_passages(&passages, profile.entry_label),
            profile.source,
            query,
        ),
        Err(e) => {
            tracing::warn!(index = index.name(), error = %e, "knowledge search failed");
            profile.failure_result(&e, query)
        }
    }
}

/// 扩展查询后按关键词过滤命中结果的检索方式
#[derive(Debug, Clone, Copy)]
pub struct PassageFilter {
    /// 扩展查询的检索条数
    pub k: usize,
    /// 结果中至少包含其一才会保留
    pub keywords: &'static [&'static str],
    /// 过滤后为空时，用原始查询再检索的条数
    pub fallback_k: Option<usize>,
    /// 回退结果的分隔符标签
    pub fallback_label: &'static str,
}

/// 先用扩展查询检索并过滤，必要时回退到原始查询
pub async fn retrieve_filtered(
    index: Option<&dyn KnowledgeIndex>,
    expanded_query: &str,
    original_query: &str,
    filter: &PassageFilter,
    profile: &RetrievalProfile,
    timeout: Duration,
) -> RetrievalResult {
    let Some(index) = index else {
        return profile.unavailable_result(original_query);
    };

    let passages = match search_with_timeout(index, expanded_query, filter.k.max(1), timeout).await
    {
        Ok(passages) => passages,
        Err(e) => {
            tracing::warn!(index = index.name(), error = %e, "filtered knowledge search failed");
            return profile.failure_result(&e, expanded_query);
        }
    };

    let kept: Vec<Passage> = passages
        .into_iter()
        .filter(|p| {
            let lowered = p.text.to_lowercase();
            filter.keywords.iter().any(|kw| lowered.contains(kw))
        })
        .collect();

    if !kept.is_empty() {
        return RetrievalResult::success(
            format_passages(&kept, profile.entry_label),
            profile.source,
            expanded_query,
        );
    }

    if let Some(fallback_k) = filter.fallback_k {
        match search_with_timeout(index, original_query, fallback_k.max(1), timeout).await {
            Ok(passages) if !passages.is_empty() => {
                return RetrievalResult::success(
                    format_passages(&passages, filter.fallback_label),
                    profile.source,
                    expanded_query,
                );
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(index = index.name(), error = %e, "fallback knowledge search failed");
                return profile.failure_result(&e, original_query);
            }
        }
    }

    profile.not_found_result(original_query, expanded_query)
}

/// 渲染检索结果：`--- LABEL i ---` 分隔、去除首尾空白、空行连接，保持原有顺序
pub fn format_passages(passages: &[Passage], label: &str) -> String {
    passages
        .iter()
        .enumerate()
        .map(|(i, passage)| format!("--- {} {} ---\n{}", label, i + 1, passage.text.trim()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

async fn search_with_timeout(
    index: &dyn KnowledgeIndex,
    query: &str,
    k: usize,
    timeout: Duration,
) -> Result<Vec<Passage>, KnowledgeError> {
    match tokio::time::timeout(timeout, index.search(query, k)).await {
        Ok(result) => result,
        Err(_) => Err(KnowledgeError::Timeout(timeout.as_millis() as u64)),
    }
}
