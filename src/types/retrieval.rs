use serde::{Deserialize, Serialize};

/// 检索结果状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetrievalStatus {
    /// 找到了相关内容
    #[serde(rename = "success")]
    Success,
    /// 资源可用，但没有命中
    #[serde(rename = "partial")]
    Partial,
    /// 资源不可用或检索失败
    #[serde(rename = "error")]
    Error,
}

impl std::fmt::Display for RetrievalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetrievalStatus::Success => write!(f, "success"),
            RetrievalStatus::Partial => write!(f, "partial"),
            RetrievalStatus::Error => write!(f, "error"),
        }
    }
}

/// 一次检索的结构化结果，创建后不可变
///
/// `Success` 的 `context` 一定非空；`Partial` 与 `Error` 的 `context` 总是携带可读的说明。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    status: RetrievalStatus,
    context: String,
    source: Option<String>,
    query_used: String,
}

impl RetrievalResult {
    /// 成功结果；空的 context 会被降级为 partial
    pub fn success(
        context: impl Into<String>,
        source: impl Into<String>,
        query_used: impl Into<String>,
    ) -> Self {
        let context = context.into();
        let query_used = query_used.into();
        if context.trim().is_empty() {
            return Self::partial(
                format!(
                    "No se encontró información específica sobre '{}'.",
                    query_used
                ),
                query_used,
            );
        }
        Self {
            status: RetrievalStatus::Success,
            context,
            source: Some(source.into()),
            query_used,
        }
    }

    /// 资源可用但没有命中
    pub fn partial(message: impl Into<String>, query_used: impl Into<String>) -> Self {
        Self {
            status: RetrievalStatus::Partial,
            context: non_empty(message.into(), "No se encontraron resultados."),
            source: None,
            query_used: query_used.into(),
        }
    }

    /// 资源不可用或检索过程出错
    pub fn error(message: impl Into<String>, query_used: impl Into<String>) -> Self {
        Self {
            status: RetrievalStatus::Error,
            context: non_empty(
                message.into(),
                "Se produjo un error inesperado durante la consulta.",
            ),
            source: None,
            query_used: query_used.into(),
        }
    }

    pub fn status(&self) -> RetrievalStatus {
        self.status
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn query_used(&self) -> &str {
        &self.query_used
    }

    pub fn is_success(&self) -> bool {
        self.status == RetrievalStatus::Success
    }
}

fn non_empty(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_with_empty_context_is_downgraded() {
        let result = RetrievalResult::success("   ", "enology_knowledge_base", "tinto");
        assert_eq!(result.status(), RetrievalStatus::Partial);
        assert!(!result.context().is_empty());
        assert!(result.source().is_none());
    }

    #[test]
    fn test_error_and_partial_never_empty() {
        assert!(!RetrievalResult::error("", "q").context().is_empty());
        assert!(!RetrievalResult::partial("", "q").context().is_empty());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&RetrievalStatus::Partial).unwrap();
        assert_eq!(json, "\"partial\"");
    }
}
