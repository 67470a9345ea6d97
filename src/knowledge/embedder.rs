//! 基于哈希的词袋向量，确定性、无需下载模型

use md5::{Digest, Md5};
use regex::Regex;
use std::sync::LazyLock;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+").expect("valid token pattern"));

/// 检索时忽略的常见西班牙语虚词
const STOPWORDS: &[&str] = &[
    "a", "al", "algo", "como", "con", "de", "del", "el", "en", "es", "la", "las", "lo", "los",
    "me", "mi", "para", "por", "que", "qué", "se", "su", "un", "una", "uno", "y", "o", "u",
];

/// 哈希词袋向量生成器
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimensions: usize,
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(512)
    }
}

impl HashEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.clamp(8, 4096),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// 将文本切分为规范化的词元（小写、去重音、去虚词）
    pub fn tokenize(text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        TOKEN_PATTERN
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|token| !STOPWORDS.contains(token))
            .map(fold_accents)
            .collect()
    }

    /// 生成L2归一化的向量；没有有效词元时返回全零向量
    pub fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        for token in Self::tokenize(text) {
            let idx = self.bucket(&token);
            vector[idx] += 1.0;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }

    fn bucket(&self, token: &str) -> usize {
        let digest = Md5::digest(token.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        (u64::from_le_bytes(bytes) % self.dimensions as u64) as usize
    }
}

/// 余弦相似度（输入均已归一化）
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn fold_accents(token: &str) -> String {
    token
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            other => other,
        })
        .collect()
}
