use serde::{Deserialize, Serialize};

use crate::types::Domain;

/// 专家能力的静态注册表，id 在启动后不会改变，同时作为 LLM 工具名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    QueryWineKnowledge,
    RecommendWinePairing,
    QueryCulinaryKnowledge,
    GetRecipeDetails,
    SuggestCookingTechnique,
    QueryNutritionKnowledge,
    GetUsdaNutritionData,
    AnalyzeNutritionalContent,
}

impl Capability {
    pub const ALL: [Capability; 8] = [
        Capability::QueryWineKnowledge,
        Capability::RecommendWinePairing,
        Capability::QueryCulinaryKnowledge,
        Capability::GetRecipeDetails,
        Capability::SuggestCookingTechnique,
        Capability::QueryNutritionKnowledge,
        Capability::GetUsdaNutritionData,
        Capability::AnalyzeNutritionalContent,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Capability::QueryWineKnowledge => "query_wine_knowledge",
            Capability::RecommendWinePairing => "recommend_wine_pairing",
            Capability::QueryCulinaryKnowledge => "query_culinary_knowledge",
            Capability::GetRecipeDetails => "get_recipe_details",
            Capability::SuggestCookingTechnique => "suggest_cooking_technique",
            Capability::QueryNutritionKnowledge => "query_nutrition_knowledge",
            Capability::GetUsdaNutritionData => "get_usda_nutrition_data",
            Capability::AnalyzeNutritionalContent => "analyze_nutritional_content",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    /// 能力所属的专家领域
    pub fn domain(&self) -> Domain {
        match self {
            Capability::QueryWineKnowledge | Capability::RecommendWinePairing => Domain::Wine,
            Capability::QueryCulinaryKnowledge
            | Capability::GetRecipeDetails
            | Capability::SuggestCookingTechnique => Domain::Culinary,
            Capability::QueryNutritionKnowledge
            | Capability::GetUsdaNutritionData
            | Capability::AnalyzeNutritionalContent => Domain::Nutrition,
        }
    }

    /// 暴露给LLM的工具说明
    pub fn description(&self) -> &'static str {
        match self {
            Capability::QueryWineKnowledge => {
                "Consulta la base de conocimientos enológica: vinos, bodegas, variedades, catas y maridajes."
            }
            Capability::RecommendWinePairing => {
                "Recomienda maridajes de vino para un plato concreto."
            }
            Capability::QueryCulinaryKnowledge => {
                "Consulta la base de conocimientos culinaria: cocina, recetas y técnicas."
            }
            Capability::GetRecipeDetails => {
                "Obtiene detalles de una receta: ingredientes, preparación y pasos."
            }
            Capability::SuggestCookingTechnique => {
                "Sugiere técnicas de cocción y preparación para un ingrediente o plato."
            }
            Capability::QueryNutritionKnowledge => {
                "Consulta la base de conocimientos nutricional: dietas, salud y nutrientes."
            }
            Capability::GetUsdaNutritionData => {
                "Obtiene datos nutricionales precisos de un alimento desde USDA FoodData Central."
            }
            Capability::AnalyzeNutritionalContent => {
                "Analiza el contenido nutricional de uno o varios alimentos combinando la base de conocimientos y los datos USDA."
            }
        }
    }

    /// 工具参数的说明
    pub fn argument_description(&self) -> &'static str {
        match self {
            Capability::QueryWineKnowledge
            | Capability::QueryCulinaryKnowledge
            | Capability::QueryNutritionKnowledge => "Consulta del usuario en lenguaje natural",
            Capability::RecommendWinePairing => "Plato o comida para la que se busca un vino",
            Capability::GetRecipeDetails => "Nombre del plato o receta",
            Capability::SuggestCookingTechnique => "Ingrediente, plato o técnica de interés",
            Capability::GetUsdaNutritionData => "Nombre del alimento, en español o inglés",
            Capability::AnalyzeNutritionalContent => "Lista de alimentos a analizar",
        }
    }

    /// 领域的主检索能力，协调者默认调用它
    pub fn primary(domain: Domain) -> Option<Self> {
        match domain {
            Domain::Wine => Some(Capability::QueryWineKnowledge),
            Domain::Culinary => Some(Capability::QueryCulinaryKnowledge),
            Domain::Nutrition => Some(Capability::QueryNutritionKnowledge),
            Domain::Multi | Domain::General => None,
        }
    }

    /// 某个领域的全部能力，按注册顺序
    pub fn for_domain(domain: Domain) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|c| c.domain() == domain)
            .collect()
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}
