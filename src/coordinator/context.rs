use std::sync::Arc;

use anyhow::Result;

use crate::{
    config::Config, coordinator::Coordinator, llm::client::LLMClient, memory::InteractionLog,
    specialists::SpecialistRegistry,
};

#[derive(Clone)]
pub struct MaitreContext {
    /// 配置
    pub config: Config,
    /// 协调者，所有会话共享
    pub coordinator: Arc<Coordinator>,
    /// 交互日志
    pub history: InteractionLog,
}

impl MaitreContext {
    /// 按配置创建专家与协调者
    ///
    /// LLM客户端创建失败时关闭润色，直接返回检索内容。
    pub fn new(config: Config) -> Result<Self> {
        let registry = SpecialistRegistry::from_config(&config);
        let history = InteractionLog::new();

        let mut coordinator = Coordinator::new(registry, history.clone())
            .with_trace(config.trace.enabled)
            .with_history_window(config.history_window);

        if config.llm.narration {
            match LLMClient::new(config.clone()) {
                Ok(client) => coordinator = coordinator.with_narrator(Arc::new(client)),
                Err(e) => {
                    tracing::warn!(error = %e, "narration disabled");
                    eprintln!(
                        "⚠️ No se pudo activar la redacción con LLM; se devolverá el contenido recuperado: {}",
                        e
                    );
                }
            }
        }

        Ok(Self {
            config,
            coordinator: Arc::new(coordinator),
            history,
        })
    }

    /// 各专家知识库的可用情况
    pub fn availability_report(&self) -> String {
        let mut report = String::new();
        for specialist in self.coordinator.registry().iter() {
            let profile = specialist.profile();
            let mark = if specialist.has_index() { "✅" } else { "⚠️" };
            report.push_str(&format!(
                "{} {} ({})\n",
                mark, profile.agent_name, profile.index_name
            ));
        }
        report
    }
}
