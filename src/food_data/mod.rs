//! 食品营养数据 - USDA FoodData Central 客户端、查询翻译与结果格式化

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod format;
pub mod translation;
pub mod usda;

pub use format::format_food_search;
pub use translation::translate_query;
pub use usda::UsdaClient;

/// 食品数据API错误
#[derive(Debug, Error)]
pub enum FoodDataError {
    #[error("error de red al consultar la API USDA: {0}")]
    Request(#[source] reqwest::Error),

    #[error("la API USDA respondió con estado {status}: {body}")]
    Status { status: u16, body: String },

    #[error("respuesta no válida de la API USDA: {0}")]
    Decode(String),

    #[error("la API USDA superó el tiempo de espera de {0} s")]
    Timeout(u64),
}

/// `foods/search` 的响应，只保留格式化需要的字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSearchResponse {
    #[serde(default)]
    pub foods: Vec<FoodItem>,
    #[serde(default)]
    pub total_hits: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fdc_id: Option<u64>,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub food_nutrients: Vec<FoodNutrient>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodNutrient {
    #[serde(default)]
    pub nutrient_name: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit_name: Option<String>,
}

/// 一次食品搜索：原始查询、实际发送的查询以及响应
#[derive(Debug, Clone, PartialEq)]
pub struct FoodSearch {
    pub original_query: String,
    pub translated_query: String,
    pub response: FoodSearchResponse,
}

impl FoodSearch {
    /// 查询被翻译过时返回说明文字
    pub fn translation_note(&self) -> Option<String> {
        if self.translated_query == self.original_query {
            return None;
        }
        Some(format!(
            "Consulta traducida: '{}' → '{}'",
            self.original_query, self.translated_query
        ))
    }
}

/// 食品营养数据来源
#[async_trait]
pub trait FoodDataSource: Send + Sync {
    /// 按名称搜索食品；`data_types` 为空时使用默认的数据类型
    async fn search_foods(
        &self,
        query: &str,
        data_types: &[String],
        page_size: usize,
    ) -> Result<FoodSearch, FoodDataError>;
}
