//! 追踪信息：以隐藏的HTML片段附加在回答末尾的机器可读元数据

use serde::{Deserialize, Serialize};

use crate::types::{Domain, RetrievalStatus};

const SPAN_PREFIX: &str = "<span data-trace-info='";
const SPAN_SUFFIX: &str = "' style='display:none;'></span>";

/// 回答的追踪记录，创建后不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub agent_name: String,
    pub domains: Vec<Domain>,
    pub tools_used: Vec<String>,
    /// 至少一次检索成功时为 `RAG`，否则为 `LLM`
    pub source: String,
    pub status: String,
    /// 每个领域的检索结果状态，顺序与咨询顺序一致
    #[serde(default)]
    pub retrievals: Vec<RetrievalTrace>,
    /// 原始检索上下文
    pub rag_context: String,
}

/// 单次检索的追踪信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalTrace {
    pub domain: Domain,
    pub tool: Option<String>,
    pub status: RetrievalStatus,
}

impl TraceRecord {
    /// 渲染为隐藏的 span；JSON 中的 `&` 与 `'` 转义为HTML实体，保证属性值可以无损还原
    pub fn to_span(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(self)?;
        Ok(format!("{}{}{}", SPAN_PREFIX, escape_attribute(&json), SPAN_SUFFIX))
    }

    /// 从文本中找出追踪片段并还原
    pub fn from_text(text: &str) -> Option<Self> {
        let start = text.rfind(SPAN_PREFIX)? + SPAN_PREFIX.len();
        let end = start + text[start..].find(SPAN_SUFFIX)?;
        serde_json::from_str(&unescape_attribute(&text[start..end])).ok()
    }
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('\'', "&#39;")
}

fn unescape_attribute(value: &str) -> String {
    value.replace("&#39;", "'").replace("&amp;", "&")
}
