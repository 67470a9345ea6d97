//! 知识库 - 语义索引的抽象、本地实现以及检索结果格式化

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

pub mod embedder;
pub mod loader;
pub mod local_index;
pub mod retrieval;

pub use local_index::LocalIndex;
pub use retrieval::{PassageFilter, RetrievalProfile, format_passages, retrieve, retrieve_filtered};

/// 从知识库中检索到的一段文本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    /// 文本内容
    pub text: String,
    /// 来源（文件名等）
    #[serde(default)]
    pub source: Option<String>,
}

impl Passage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: None,
        }
    }

    pub fn with_source(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: Some(source.into()),
        }
    }
}

/// 知识库错误
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("no se pudo leer el índice '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("formato de índice no válido en '{path}': {message}")]
    Format { path: String, message: String },

    #[error("la búsqueda superó el tiempo de espera de {0} ms")]
    Timeout(u64),

    #[error("error en la búsqueda: {0}")]
    Search(String),
}

/// 语义索引：按相关度从高到低返回最多k段文本
///
/// 没有命中时返回空列表；出错时返回 `Err`，两者必须可区分。
#[async_trait]
pub trait KnowledgeIndex: Send + Sync {
    /// 索引名称，用于日志
    fn name(&self) -> &str;

    /// 检索与查询最相关的k段文本
    async fn search(&self, query: &str, k: usize) -> Result<Vec<Passage>, KnowledgeError>;
}

/// 在启动时加载某个领域的知识库；路径不存在或加载失败时返回None
pub fn load_index(name: &str, path: &Path) -> Option<Arc<dyn KnowledgeIndex>> {
    if !path.exists() {
        tracing::warn!(index = name, path = %path.display(), "knowledge index not found");
        println!(
            "⚠️ No se encontró la base de conocimiento {}: {}",
            name,
            path.display()
        );
        return None;
    }

    match LocalIndex::load(name, path) {
        Ok(index) => {
            tracing::info!(
                index = name,
                passages = index.len(),
                path = %path.display(),
                "knowledge index loaded"
            );
            println!(
                "✅ Base de conocimiento {} cargada: {} fragmentos",
                name,
                index.len()
            );
            Some(Arc::new(index))
        }
        Err(e) => {
            tracing::error!(index = name, error = %e, "failed to load knowledge index");
            eprintln!("❌ No se pudo cargar la base de conocimiento {}: {}", name, e);
            None
        }
    }
}
