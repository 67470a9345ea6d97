use super::{Specialist, SpecialistProfile};
use crate::food_data::format_food_search;
use crate::knowledge::{RetrievalProfile, retrieve};
use crate::types::{Domain, RetrievalResult};

pub static PROFILE: SpecialistProfile = SpecialistProfile {
    domain: Domain::Nutrition,
    index_name: "nutrition",
    agent_name: "nutrition_specialist",
    interaction_reason: "nutritional_expertise",
    section_title: "🥗 ANÁLISIS DEL NUTRICIONISTA",
    framing: "Nuestro nutricionista ha reunido para usted la siguiente información nutricional:",
    preamble: r#"Eres el nutricionista experto del equipo del Maître Digital. Respondes en español, con un tono profesional pero comprensible.

HERRAMIENTAS ESPECIALIZADAS:
- query_nutrition_knowledge: consultas generales sobre nutrición, dietas y salud
- get_usda_nutrition_data: datos nutricionales precisos de alimentos concretos
- analyze_nutritional_content: análisis nutricional completo de varios alimentos

PROTOCOLO DE RESPUESTA:
1. Usa la información de contexto recibida y, si falta algo, la herramienta más apropiada
2. Indica siempre las cifras con sus unidades
3. Incluye recomendaciones de salud cuando sea apropiado"#,
};

const NUTRITION_KNOWLEDGE: RetrievalProfile = RetrievalProfile {
    entry_label: "CONOCIMIENTO NUTRICIONAL",
    source: "nutrition_knowledge_base",
    unavailable: "La base de conocimientos nutricional no está disponible temporalmente.",
    not_found: "No encontré información específica sobre '{query}' en mi base de conocimientos nutricional.",
    failure: "Error técnico en consulta nutricional",
    suggestion: "Como nutricionista, puedo ayudarte con calorías, macronutrientes, dietas, o análisis nutricional.",
};

const NUTRITIONAL_ANALYSIS: RetrievalProfile = RetrievalProfile {
    entry_label: "ANÁLISIS NUTRICIONAL",
    source: "nutritional_analysis_combined",
    unavailable: "La base de conocimientos nutricional no está disponible temporalmente.",
    not_found: "No pude encontrar análisis nutricional específico para '{query}'.",
    failure: "Error en análisis nutricional",
    suggestion: "Como nutricionista, puedo ayudarte con análisis nutricional general o de alimentos específicos.",
};

const USDA_SOURCE: &str = "USDA_FoodData_Central_API";

const USDA_SUGGESTION: &str = "Como nutricionista, puedo proporcionarte información nutricional general o buscar alimentos similares.";

/// 综合分析时每个来源的食品条数
const ANALYSIS_PAGE_SIZE: usize = 2;

const ANALYSIS_K: usize = 2;

pub(super) async fn query_nutrition_knowledge(
    specialist: &Specialist,
    query: &str,
) -> RetrievalResult {
    retrieve(
        specialist.index(),
        query,
        specialist.default_k(),
        &NUTRITION_KNOWLEDGE,
        specialist.search_timeout(),
    )
    .await
}

pub(super) async fn get_usda_nutrition_data(
    specialist: &Specialist,
    food: &str,
) -> RetrievalResult {
    let Some(access) = specialist.food_data() else {
        return RetrievalResult::error(
            format!("La consulta a la base de datos USDA no está habilitada. {}", USDA_SUGGESTION),
            food,
        );
    };

    match access
        .source
        .search_foods(food, &access.data_types, access.page_size)
        .await
    {
        Ok(search) => match format_food_search(&search) {
            Some(text) => RetrievalResult::success(text, USDA_SOURCE, food),
            None => RetrievalResult::partial(
                format!(
                    "No encontré datos específicos para '{}' en la base de datos USDA. {}",
                    food, USDA_SUGGESTION
                ),
                food,
            ),
        },
        Err(e) => {
            tracing::warn!(food, error = %e, "USDA food search failed");
            RetrievalResult::error(
                format!(
                    "No pude acceder a la base de datos USDA: {}. {}",
                    e, USDA_SUGGESTION
                ),
                food,
            )
        }
    }
}

/// 结合知识库与USDA数据的营养分析，任一来源失败都不会影响另一个
pub(super) async fn analyze_nutritional_content(
    specialist: &Specialist,
    foods: &str,
) -> RetrievalResult {
    let mut sections = Vec::new();

    if specialist.has_index() {
        let expanded = format!(
            "análisis nutricional {} calorías proteínas carbohidratos",
            foods.trim()
        );
        let knowledge = retrieve(
            specialist.index(),
            &expanded,
            ANALYSIS_K,
            &NUTRITIONAL_ANALYSIS,
            specialist.search_timeout(),
        )
        .await;
        if knowledge.is_success() {
            sections.push(format!(
                "=== ANÁLISIS NUTRICIONAL ESPECIALIZADO ===\n{}",
                knowledge.context()
            ));
        }
    }

    if let Some(access) = specialist.food_data() {
        match access
            .source
            .search_foods(foods, &access.data_types, ANALYSIS_PAGE_SIZE)
            .await
        {
            Ok(search) => {
                if let Some(text) = format_food_search(&search) {
                    sections.push(format!("=== DATOS NUTRICIONALES USDA ===\n{}", text));
                }
            }
            Err(e) => {
                tracing::warn!(foods, error = %e, "USDA search for nutritional analysis failed");
            }
        }
    }

    if sections.is_empty() {
        return RetrievalResult::partial(
            format!(
                "{} {}",
                NUTRITIONAL_ANALYSIS.not_found.replace("{query}", foods),
                NUTRITIONAL_ANALYSIS.suggestion
            ),
            foods,
        );
    }

    RetrievalResult::success(
        sections.join("\n\n"),
        NUTRITIONAL_ANALYSIS.source,
        foods,
    )
}
