use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::types::Domain;

/// 一条交互记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub query: String,
    pub domain: Domain,
    pub timestamp: DateTime<Utc>,
}

impl InteractionRecord {
    pub fn new(query: impl Into<String>, domain: Domain) -> Self {
        Self {
            query: query.into(),
            domain,
            timestamp: Utc::now(),
        }
    }
}

/// 进程级的只追加交互日志，可在多个会话之间共享
///
/// 追加操作通过写锁串行化，读取方只拿到快照。
#[derive(Debug, Clone, Default)]
pub struct InteractionLog {
    records: Arc<RwLock<Vec<InteractionRecord>>>,
}

impl InteractionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条记录
    pub async fn append(&self, record: InteractionRecord) {
        let mut records = self.records.write().await;
        tracing::debug!(domain = %record.domain, total = records.len() + 1, "interaction recorded");
        records.push(record);
    }

    /// 最近的n条记录，按时间先后排列
    pub async fn recent(&self, n: usize) -> Vec<InteractionRecord> {
        let records = self.records.read().await;
        let start = records.len().saturating_sub(n);
        records[start..].to_vec()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recent_returns_latest_in_order() {
        let log = InteractionLog::new();
        for (query, domain) in [
            ("tinto", Domain::Wine),
            ("paella", Domain::Culinary),
            ("calorías", Domain::Nutrition),
        ] {
            log.append(InteractionRecord::new(query, domain)).await;
        }

        let recent = log.recent(2).await;
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].query, "paella");
        assert_eq!(recent[1].domain, Domain::Nutrition);

        assert_eq!(log.recent(10).await.len(), 3);
        assert!(log.recent(0).await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_all_kept() {
        let log = InteractionLog::new();
        let mut handles = Vec::new();
        for i in 0..16 {
            let log = log.clone();
            handles.push(tokio::spawn(async move {
                log.append(InteractionRecord::new(format!("consulta {}", i), Domain::General))
                    .await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(log.len().await, 16);
        assert!(!log.is_empty().await);
    }
}
