use super::{Specialist, SpecialistProfile};
use crate::knowledge::{PassageFilter, RetrievalProfile, retrieve, retrieve_filtered};
use crate::types::{Domain, RetrievalResult};

pub static PROFILE: SpecialistProfile = SpecialistProfile {
    domain: Domain::Wine,
    index_name: "enology",
    agent_name: "sumiller_specialist",
    interaction_reason: "wine_and_pairing_expertise",
    section_title: "🍷 RECOMENDACIÓN DEL SUMILLER",
    framing: "Nuestro sumiller ha seleccionado para usted la siguiente información enológica:",
    preamble: r#"Eres el sumiller experto del equipo del Maître Digital. Respondes en español, con un tono profesional y cercano.

HERRAMIENTAS ESPECIALIZADAS:
- query_wine_knowledge: consultas generales sobre vinos, bodegas, variedades y catas
- recommend_wine_pairing: maridajes para un plato concreto

PROTOCOLO DE RESPUESTA:
1. Usa la información de contexto recibida y, si falta algo, la herramienta más apropiada
2. No inventes vinos ni bodegas que no aparezcan en el contexto
3. Justifica cada recomendación de maridaje"#,
};

const WINE_KNOWLEDGE: RetrievalProfile = RetrievalProfile {
    entry_label: "CONOCIMIENTO ENOLÓGICO",
    source: "enology_knowledge_base",
    unavailable: "La base de conocimientos enológica no está disponible temporalmente.",
    not_found: "No encontré información específica sobre '{query}' en mi base de conocimientos enológica.",
    failure: "Error técnico en consulta enológica",
    suggestion: "Como sumiller, puedo ayudarte con otros aspectos: tipos de vino, maridajes, bodegas, catas, o recomendaciones generales.",
};

const WINE_PAIRING: RetrievalProfile = RetrievalProfile {
    entry_label: "MARIDAJE RECOMENDADO",
    source: "wine_pairing_expertise",
    unavailable: "Sistema de maridajes no disponible temporalmente.",
    not_found: "No encontré maridajes específicos para '{query}' en mi base de conocimientos.",
    failure: "Error en sistema de maridajes",
    suggestion: "Como sumiller experto, puedo sugerir maridajes clásicos si me describes el plato con más detalle.",
};

const PAIRING_FILTER: PassageFilter = PassageFilter {
    k: 4,
    keywords: &["maridaje", "maridar", "acompañar", "combinar"],
    fallback_k: Some(2),
    fallback_label: "INFORMACIÓN RELACIONADA",
};

pub(super) async fn query_wine_knowledge(specialist: &Specialist, query: &str) -> RetrievalResult {
    retrieve(
        specialist.index(),
        query,
        specialist.default_k(),
        &WINE_KNOWLEDGE,
        specialist.search_timeout(),
    )
    .await
}

pub(super) async fn recommend_wine_pairing(specialist: &Specialist, dish: &str) -> RetrievalResult {
    let expanded = format!("maridaje {} vino recomendación", dish.trim());
    retrieve_filtered(
        specialist.index(),
        &expanded,
        dish,
        &PAIRING_FILTER,
        &WINE_PAIRING,
        specialist.search_timeout(),
    )
    .await
}
