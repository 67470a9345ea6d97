use async_trait::async_trait;
use std::path::Path;

use super::embedder::{HashEmbedder, cosine};
use super::loader::load_passages;
use super::{KnowledgeError, KnowledgeIndex, Passage};

/// 进程内的只读语义索引
pub struct LocalIndex {
    name: String,
    embedder: HashEmbedder,
    entries: Vec<IndexedPassage>,
}

struct IndexedPassage {
    passage: Passage,
    vector: Vec<f32>,
}

impl LocalIndex {
    /// 从文件或目录构建索引
    pub fn load(name: &str, path: &Path) -> Result<Self, KnowledgeError> {
        let passages = load_passages(path)?;
        Ok(Self::from_passages(name, passages))
    }

    /// 由内存中的文本段构建索引，主要用于测试与嵌入式场景
    pub fn from_passages(name: &str, passages: Vec<Passage>) -> Self {
        let embedder = HashEmbedder::default();
        let entries = passages
            .into_iter()
            .filter(|p| !p.text.trim().is_empty())
            .map(|passage| IndexedPassage {
                vector: embedder.embed(&passage.text),
                passage,
            })
            .collect();

        Self {
            name: name.to_string(),
            embedder,
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 相似度大于0的前k段，分数相同时保持入库顺序
    fn top_k(&self, query: &str, k: usize) -> Vec<Passage> {
        let query_vector = self.embedder.embed(query);

        let mut scored: Vec<(f32, &IndexedPassage)> = self
            .entries
            .iter()
            .map(|entry| (cosine(&query_vector, &entry.vector), entry))
            .filter(|(score, _)| *score > 0.0)
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        scored
            .into_iter()
            .take(k)
            .map(|(_, entry)| entry.passage.clone())
            .collect()
    }
}

#[async_trait]
impl KnowledgeIndex for LocalIndex {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: &str, k: usize) -> Result<Vec<Passage>, KnowledgeError> {
        Ok(self.top_k(query, k))
    }
}
