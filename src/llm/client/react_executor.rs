//! ReAct执行器 - 专家Agent带工具的多轮润色

use anyhow::Result;
use rig::completion::{AssistantContent, Message, PromptError};

use super::providers::ProviderAgent;

/// ReAct执行器
pub struct ReActExecutor;

impl ReActExecutor {
    /// 执行多轮对话；达到最大轮数时返回最后一次助手输出
    pub async fn execute(
        agent: &ProviderAgent,
        user_prompt: &str,
        max_iterations: usize,
    ) -> Result<String> {
        tracing::debug!(max_iterations, "narration started");

        match agent.multi_turn(user_prompt, max_iterations).await {
            Ok(response) => Ok(response),
            Err(PromptError::MaxDepthError {
                max_depth,
                chat_history,
                prompt: _,
            }) => {
                let (content, tool_calls) = Self::extract_partial_result(&chat_history);
                tracing::warn!(max_depth, tool_calls = ?tool_calls, "narration stopped at max depth");
                content.ok_or_else(|| {
                    anyhow::anyhow!("la narración alcanzó el máximo de iteraciones ({})", max_depth)
                })
            }
            Err(e) => Err(anyhow::anyhow!("error del modelo de lenguaje: {}", e)),
        }
    }

    /// 从聊天历史中提取最后的助手文本以及工具调用
    fn extract_partial_result(chat_history: &[Message]) -> (Option<String>, Vec<String>) {
        let last_assistant_message = chat_history.iter().rev().find_map(|msg| {
            if let Message::Assistant { content, .. } = msg {
                let text_content = content
                    .iter()
                    .filter_map(|c| {
                        if let AssistantContent::Text(text) = c {
                            Some(text.text.clone())
                        } else {
                            None
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n");

                if !text_content.is_empty() {
                    Some(text_content)
                } else {
                    None
                }
            } else {
                None
            }
        });

        let mut tool_calls = Vec::new();
        for msg in chat_history {
            if let Message::Assistant { content, .. } = msg {
                for c in content.iter() {
                    if let AssistantContent::ToolCall(tool_call) = c {
                        tool_calls.push(tool_call.function.name.clone());
                    }
                }
            }
        }

        (last_assistant_message, tool_calls)
    }
}
