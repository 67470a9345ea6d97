//! LLM客户端 - 提供统一的LLM服务接口

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, LLMProvider};
use crate::llm::tools::capability::AgentToolCapability;
use crate::llm::{NarrationRequest, Narrator};
use crate::specialists::Specialist;

mod providers;
mod react_executor;

use providers::ProviderClient;
use react_executor::ReActExecutor;

/// 多领域回答时协调者使用的系统提示词
const COORDINATOR_PREAMBLE: &str = r#"Eres el Maître Digital, coordinador de un equipo formado por un sumiller, un chef y un nutricionista. Respondes en español, con un tono cordial y profesional.

Tu tarea es integrar en una única respuesta coherente la información que cada especialista ha aportado. Puedes usar las herramientas de los especialistas si falta algún dato, pero no inventes información que no aparezca en el contexto."#;

/// LLM客户端 - 提供统一的LLM服务接口
///
/// 不做自动重试：失败直接返回，由调用方区分限流与其他错误。
#[derive(Clone)]
pub struct LLMClient {
    config: Config,
    client: ProviderClient,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: Config) -> Result<Self> {
        if config.llm.api_key.trim().is_empty() && config.llm.provider != LLMProvider::Ollama {
            anyhow::bail!(
                "no API key configured for provider {} (set MAITRE_LLM_API_KEY or llm.api_key)",
                config.llm.provider
            );
        }
        let client = ProviderClient::new(&config.llm)
            .with_context(|| format!("Failed to create {} client", config.llm.provider))?;
        Ok(Self { client, config })
    }

    /// 构造发给专家Agent的用户提示
    fn build_prompt(request: &NarrationRequest<'_>) -> String {
        format!(
            "Consulta del cliente:\n{}\n\nMotivo de la consulta: {}\n\nBorrador preparado con la información recuperada:\n{}\n\n\
             Redacta la respuesta final para el cliente a partir del borrador. Conserva los datos concretos, \
             no repitas el saludo inicial y termina ofreciendo ayuda adicional.",
            request.query, request.decision.delegation_reason, request.draft
        )
    }
}

#[async_trait]
impl Narrator for LLMClient {
    async fn narrate(
        &self,
        request: &NarrationRequest<'_>,
        specialists: &[Arc<Specialist>],
    ) -> Result<String> {
        let llm_config = &self.config.llm;

        let (model, preamble) = match specialists {
            [single] => (&llm_config.model_specialist, single.profile().preamble),
            _ => (&llm_config.model_coordinator, COORDINATOR_PREAMBLE),
        };

        let tools = specialists
            .iter()
            .flat_map(|specialist| {
                specialist
                    .capabilities()
                    .into_iter()
                    .map(|capability| AgentToolCapability::new(capability, specialist.clone()))
            })
            .collect::<Vec<_>>();

        let agent = self
            .client
            .create_agent_with_tools(model, preamble, llm_config, tools)?;
        let prompt = Self::build_prompt(request);

        tracing::info!(model = %model, provider = %llm_config.provider, "narrating reply");

        let timeout = Duration::from_secs(llm_config.timeout_seconds);
        match tokio::time::timeout(
            timeout,
            ReActExecutor::execute(&agent, &prompt, llm_config.max_tool_iterations),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(anyhow::anyhow!(
                "la narración superó el tiempo de espera de {} s",
                llm_config.timeout_seconds
            )),
        }
    }
}
