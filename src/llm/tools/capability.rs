//! 专家能力工具：把静态注册的能力暴露给LLM

use rig::tool::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

use crate::specialists::{Capability, Specialist};
use crate::types::RetrievalResult;

/// 专家能力工具，工具名即能力 id
#[derive(Clone)]
pub struct AgentToolCapability {
    capability: Capability,
    specialist: Arc<Specialist>,
}

/// 能力调用参数
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CapabilityArgs {
    /// 查询文本
    pub query: String,
}

/// 能力工具错误
#[derive(Debug, Error)]
pub enum CapabilityToolError {
    #[error("la herramienta {0} requiere una consulta no vacía")]
    EmptyQuery(&'static str),
}

impl AgentToolCapability {
    pub fn new(capability: Capability, specialist: Arc<Specialist>) -> Self {
        Self {
            capability,
            specialist,
        }
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// 参数的 JSON Schema，附带能力自己的参数说明
    fn parameters(&self) -> serde_json::Value {
        let mut parameters = serde_json::to_value(schemars::schema_for!(CapabilityArgs))
            .unwrap_or_else(|_| serde_json::json!({ "type": "object" }));

        if let Some(object) = parameters.as_object_mut() {
            object.remove("$schema");
            object.remove("title");
        }
        if let Some(query) = parameters
            .pointer_mut("/properties/query")
            .and_then(|v| v.as_object_mut())
        {
            query.insert(
                "description".to_string(),
                serde_json::Value::String(self.capability.argument_description().to_string()),
            );
        }
        parameters
    }
}

impl Tool for AgentToolCapability {
    const NAME: &'static str = "specialist_capability";

    type Error = CapabilityToolError;
    type Args = CapabilityArgs;
    type Output = RetrievalResult;

    fn name(&self) -> String {
        self.capability.id().to_string()
    }

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: self.name(),
            description: self.capability.description().to_string(),
            parameters: self.parameters(),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        println!("   🔧 tool called...{}@{:?}", self.capability.id(), args);

        if args.query.trim().is_empty() {
            return Err(CapabilityToolError::EmptyQuery(self.capability.id()));
        }

        Ok(self.specialist.invoke(self.capability, &args.query).await)
    }
}
