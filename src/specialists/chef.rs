use super::{Specialist, SpecialistProfile};
use crate::knowledge::{PassageFilter, RetrievalProfile, retrieve, retrieve_filtered};
use crate::types::{Domain, RetrievalResult};

pub static PROFILE: SpecialistProfile = SpecialistProfile {
    domain: Domain::Culinary,
    index_name: "culinary",
    agent_name: "chef_specialist",
    interaction_reason: "culinary_expertise",
    section_title: "🍳 PROPUESTA DEL CHEF",
    framing: "Nuestro chef ha preparado para usted la siguiente información culinaria:",
    preamble: r#"Eres el chef experto del equipo del Maître Digital. Respondes en español, con un tono profesional y cercano.

HERRAMIENTAS ESPECIALIZADAS:
- query_culinary_knowledge: consultas generales sobre cocina, ingredientes y platos
- get_recipe_details: ingredientes, preparación y pasos de una receta
- suggest_cooking_technique: técnicas de cocción y preparación

PROTOCOLO DE RESPUESTA:
1. Usa la información de contexto recibida y, si falta algo, la herramienta más apropiada
2. Explica las técnicas con pasos claros
3. No inventes platos que no aparezcan en el contexto"#,
};

const CULINARY_KNOWLEDGE: RetrievalProfile = RetrievalProfile {
    entry_label: "CONOCIMIENTO CULINARIO",
    source: "culinary_knowledge_base",
    unavailable: "La base de conocimientos culinaria no está disponible temporalmente.",
    not_found: "No encontré información específica sobre '{query}' en mi base de conocimientos culinaria.",
    failure: "Error técnico en consulta culinaria",
    suggestion: "Como chef, puedo ayudarte con recetas, técnicas de cocción, ingredientes, o preparaciones específicas.",
};

const RECIPES: RetrievalProfile = RetrievalProfile {
    entry_label: "RECETA DETALLADA",
    source: "recipe_expertise",
    unavailable: "Sistema de recetas no disponible temporalmente.",
    not_found: "No encontré recetas específicas para '{query}' en mi base de conocimientos.",
    failure: "Error en sistema de recetas",
    suggestion: "Como chef experto, puedo sugerir técnicas básicas si me describes el plato que quieres preparar.",
};

const TECHNIQUES: RetrievalProfile = RetrievalProfile {
    entry_label: "TÉCNICA CULINARIA",
    source: "cooking_techniques",
    unavailable: "Sistema de técnicas culinarias no disponible.",
    not_found: "No encontré técnicas específicas para '{query}' en mi base de conocimientos.",
    failure: "Error en sistema de técnicas",
    suggestion: "Como chef experto, puedo explicarte técnicas básicas como saltear, brasear o gratinar.",
};

const RECIPE_FILTER: PassageFilter = PassageFilter {
    k: 4,
    keywords: &["receta", "ingredientes", "preparación", "pasos", "cocinar"],
    fallback_k: Some(2),
    fallback_label: "INFORMACIÓN CULINARIA",
};

const TECHNIQUE_FILTER: PassageFilter = PassageFilter {
    k: 3,
    keywords: &["técnica", "método", "cocción", "preparación"],
    fallback_k: None,
    fallback_label: "",
};

pub(super) async fn query_culinary_knowledge(
    specialist: &Specialist,
    query: &str,
) -> RetrievalResult {
    retrieve(
        specialist.index(),
        query,
        specialist.default_k(),
        &CULINARY_KNOWLEDGE,
        specialist.search_timeout(),
    )
    .await
}

pub(super) async fn get_recipe_details(specialist: &Specialist, recipe: &str) -> RetrievalResult {
    let expanded = format!("receta {} preparación ingredientes pasos", recipe.trim());
    retrieve_filtered(
        specialist.index(),
        &expanded,
        recipe,
        &RECIPE_FILTER,
        &RECIPES,
        specialist.search_timeout(),
    )
    .await
}

pub(super) async fn suggest_cooking_technique(
    specialist: &Specialist,
    technique: &str,
) -> RetrievalResult {
    let expanded = format!("técnica {} cocción preparación método", technique.trim());
    retrieve_filtered(
        specialist.index(),
        &expanded,
        technique,
        &TECHNIQUE_FILTER,
        &TECHNIQUES,
        specialist.search_timeout(),
    )
    .await
}
