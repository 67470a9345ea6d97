use crate::config::{Config, LLMProvider};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Maître Digital - 由Rust与AI驱动的多专家餐饮顾问
#[derive(Parser, Debug)]
#[command(name = "maitre-rs")]
#[command(
    about = "Multi-agent digital maître for Spanish gastronomy: routes wine, cooking and nutrition questions to specialist agents backed by local knowledge bases and USDA FoodData Central."
)]
#[command(version)]
pub struct Args {
    /// 单次查询；省略时进入交互模式
    pub query: Option<String>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 酒类知识库路径
    #[arg(long)]
    pub wine_index: Option<PathBuf>,

    /// 烹饪知识库路径
    #[arg(long)]
    pub culinary_index: Option<PathBuf>,

    /// 营养知识库路径
    #[arg(long)]
    pub nutrition_index: Option<PathBuf>,

    /// 在回答末尾附加隐藏的追踪信息
    #[arg(long)]
    pub trace: bool,

    /// 不调用LLM润色，直接返回检索内容
    #[arg(long)]
    pub no_narration: bool,

    /// 不查询USDA食品数据
    #[arg(long)]
    pub no_food_data: bool,

    /// USDA FoodData Central API KEY
    #[arg(long)]
    pub usda_api_key: Option<String>,

    /// LLM Provider (openai, deepseek, anthropic, gemini, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// 协调者使用的模型
    #[arg(long)]
    pub model_coordinator: Option<String>,

    /// 专家Agent使用的模型
    #[arg(long)]
    pub model_specialist: Option<String>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Result<Config> {
        let mut config = if let Some(config_path) = &self.config {
            // 显式指定的配置文件必须可读
            Config::from_file(config_path).with_context(|| {
                format!("No se pudo leer el archivo de configuración {:?}", config_path)
            })?
        } else {
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("maitre.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path).with_context(|| {
                    format!(
                        "No se pudo leer el archivo de configuración por defecto {:?}",
                        default_config_path
                    )
                })?
            } else {
                Config::default()
            }
        };

        // 知识库
        if let Some(path) = self.wine_index {
            config.knowledge.wine_index_path = path;
        }
        if let Some(path) = self.culinary_index {
            config.knowledge.culinary_index_path = path;
        }
        if let Some(path) = self.nutrition_index {
            config.knowledge.nutrition_index_path = path;
        }

        // 食品数据
        if self.no_food_data {
            config.food_data.enabled = false;
        }
        if let Some(api_key) = self.usda_api_key {
            config.food_data.api_key = api_key;
        }

        // LLM
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ Aviso: proveedor desconocido: {}, se usa el proveedor por defecto",
                    provider_str
                );
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model) = self.model_coordinator {
            config.llm.model_coordinator = model;
        }
        if let Some(model) = self.model_specialist {
            config.llm.model_specialist = model;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if self.no_narration {
            config.llm.narration = false;
        }

        if self.trace {
            config.trace.enabled = true;
        }
        config.verbose = config.verbose || self.verbose;

        Ok(config)
    }
}

// Include tests
#[cfg(test)]
mod tests;
