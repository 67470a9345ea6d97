use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::types::Domain;

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "gemini")]
    #[default]
    Gemini,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Gemini => write!(f, "gemini"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "gemini" => Ok(LLMProvider::Gemini),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// LLM模型配置
    pub llm: LLMConfig,

    /// 知识库配置
    pub knowledge: KnowledgeConfig,

    /// 食品营养数据API配置
    pub food_data: FoodDataConfig,

    /// 追踪信息配置
    pub trace: TraceConfig,

    /// 会话上下文摘要中保留的最近交互条数
    pub history_window: usize,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// 是否由专家Agent对回答进行润色
    pub narration: bool,

    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址
    pub api_base_url: String,

    /// 协调者使用的模型
    pub model_coordinator: String,

    /// 专家Agent使用的模型
    pub model_specialist: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 超时时间（秒）
    pub timeout_seconds: u64,

    /// 工具调用的最大轮数
    pub max_tool_iterations: usize,
}

/// 知识库配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// 酒类知识库路径
    pub wine_index_path: PathBuf,

    /// 烹饪知识库路径
    pub culinary_index_path: PathBuf,

    /// 营养知识库路径
    pub nutrition_index_path: PathBuf,

    /// 酒类检索返回条数
    pub wine_k: usize,

    /// 烹饪检索返回条数
    pub culinary_k: usize,

    /// 营养检索返回条数
    pub nutrition_k: usize,

    /// 单次检索超时（毫秒）
    pub search_timeout_ms: u64,
}

/// 食品营养数据API配置（USDA FoodData Central）
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct FoodDataConfig {
    /// 是否启用
    pub enabled: bool,

    /// API KEY
    pub api_key: String,

    /// API基地址
    pub base_url: String,

    /// 查询的数据类型
    pub data_types: Vec<String>,

    /// 每次查询的结果数
    pub page_size: usize,

    /// 超时时间（秒）
    pub timeout_seconds: u64,

    /// 两次请求之间的最小间隔（毫秒）
    pub min_request_interval_ms: u64,
}

/// 追踪信息配置
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct TraceConfig {
    /// 是否在回答末尾附加隐藏的追踪信息
    pub enabled: bool,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

impl KnowledgeConfig {
    /// 获取领域对应的知识库路径
    pub fn index_path(&self, domain: Domain) -> Option<&Path> {
        match domain {
            Domain::Wine => Some(&self.wine_index_path),
            Domain::Culinary => Some(&self.culinary_index_path),
            Domain::Nutrition => Some(&self.nutrition_index_path),
            Domain::Multi | Domain::General => None,
        }
    }

    /// 获取领域对应的默认检索条数，至少为1
    pub fn default_k(&self, domain: Domain) -> usize {
        let k = match domain {
            Domain::Wine => self.wine_k,
            Domain::Culinary => self.culinary_k,
            Domain::Nutrition => self.nutrition_k,
            Domain::Multi | Domain::General => 1,
        };
        k.max(1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LLMConfig::default(),
            knowledge: KnowledgeConfig::default(),
            food_data: FoodDataConfig::default(),
            trace: TraceConfig::default(),
            history_window: 3,
            verbose: false,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            narration: true,
            provider: LLMProvider::default(),
            api_key: std::env::var("MAITRE_LLM_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://generativelanguage.googleapis.com"),
            model_coordinator: String::from("gemini-2.0-flash"),
            model_specialist: String::from("gemini-2.5-flash"),
            max_tokens: 8192,
            temperature: 0.4,
            timeout_seconds: 60,
            max_tool_iterations: 4,
        }
    }
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            wine_index_path: PathBuf::from("./indexes/enology_index"),
            culinary_index_path: PathBuf::from("./indexes/culinary_index"),
            nutrition_index_path: PathBuf::from("./indexes/nutrition_index"),
            wine_k: 3,
            culinary_k: 2,
            nutrition_k: 2,
            search_timeout_ms: 5000,
        }
    }
}

impl Default for FoodDataConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: std::env::var("USDA_API_KEY").unwrap_or_else(|_| String::from("DEMO_KEY")),
            base_url: String::from("https://api.nal.usda.gov/fdc/v1"),
            data_types: vec!["Foundation".to_string(), "SR Legacy".to_string()],
            page_size: 3,
            timeout_seconds: 10,
            min_request_interval_ms: 4000,
        }
    }
}
