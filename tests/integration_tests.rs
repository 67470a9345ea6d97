use async_trait::async_trait;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

use maitre_rs::config::Config;
use maitre_rs::coordinator::{
    Coordinator, MaitreContext, ReplyStatus, RetrievalTrace, SessionContext, TraceRecord,
};
use maitre_rs::llm::{NarrationRequest, Narrator};
use maitre_rs::memory::InteractionLog;
use maitre_rs::specialists::{Specialist, SpecialistRegistry};
use maitre_rs::types::{Domain, RetrievalStatus};

/// 创建三个领域的知识库：酒类一段文本，烹饪为空目录，营养一段文本
fn create_indexes(dir: &Path) -> Config {
    let wine_dir = dir.join("enology_index");
    fs::create_dir_all(&wine_dir).unwrap();
    fs::write(
        wine_dir.join("maridajes.txt"),
        "Maridaje: el salmón a la plancha marida con un albariño fresco de Rías Baixas.",
    )
    .unwrap();

    let culinary_dir = dir.join("culinary_index");
    fs::create_dir_all(&culinary_dir).unwrap();

    let nutrition_dir = dir.join("nutrition_index");
    fs::create_dir_all(&nutrition_dir).unwrap();
    fs::write(
        nutrition_dir.join("nutricion.md"),
        "La fibra de las legumbres favorece la digestión y aporta saciedad.",
    )
    .unwrap();

    let mut config = Config::default();
    config.llm.narration = false;
    config.food_data.enabled = false;
    config.knowledge.wine_index_path = wine_dir;
    config.knowledge.culinary_index_path = culinary_dir;
    config.knowledge.nutrition_index_path = nutrition_dir;
    config
}

#[tokio::test]
async fn test_wine_question_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let context = MaitreContext::new(create_indexes(temp_dir.path())).unwrap();
    let mut session = SessionContext::new();

    let reply = context
        .coordinator
        .handle("¿Qué vino recomiendan para el salmón?", &mut session)
        .await;

    assert_eq!(reply.status, ReplyStatus::Answered);
    assert_eq!(reply.domain(), Domain::Wine);
    assert_eq!(reply.outcomes[0].result.status(), RetrievalStatus::Success);
    assert!(reply.decision.intro_text.contains("sumiller"));
    assert_eq!(reply.text.matches("--- CONOCIMIENTO ENOLÓGICO").count(), 1);
    assert!(reply.text.contains("albariño fresco"));
    assert!(reply.trace.is_none());
    assert_eq!(context.history.len().await, 1);
}

#[tokio::test]
async fn test_empty_culinary_index_gives_partial_with_suggestion() {
    let temp_dir = TempDir::new().unwrap();
    let context = MaitreContext::new(create_indexes(temp_dir.path())).unwrap();
    let mut session = SessionContext::new();

    let reply = context
        .coordinator
        .handle("receta de paella", &mut session)
        .await;

    assert_eq!(reply.domain(), Domain::Culinary);
    let result = &reply.outcomes[0].result;
    assert_eq!(result.status(), RetrievalStatus::Partial);
    assert!(result.context().contains("receta de paella"));
    assert!(result.context().contains("Como chef"));
    assert!(!reply.text.contains("---"));
}

#[tokio::test]
async fn test_general_question_asks_for_clarification() {
    let temp_dir = TempDir::new().unwrap();
    let context = MaitreContext::new(create_indexes(temp_dir.path())).unwrap();
    let mut session = SessionContext::new();

    let reply = context
        .coordinator
        .handle("Buenas noches", &mut session)
        .await;

    assert_eq!(reply.status, ReplyStatus::Guidance);
    assert!(reply.outcomes.is_empty());
    assert!(reply.text.starts_with("Bienvenido/a"));
}

#[tokio::test]
async fn test_trace_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = create_indexes(temp_dir.path());
    config.trace.enabled = true;
    let context = MaitreContext::new(config).unwrap();
    let mut session = SessionContext::new();

    let reply = context
        .coordinator
        .handle("¿Qué vino recomiendan para el salmón?", &mut session)
        .await;

    let rendered = reply.render();
    assert!(rendered.starts_with(&reply.text));
    assert!(rendered.ends_with("' style='display:none;'></span>"));

    let record = TraceRecord::from_text(&rendered).unwrap();
    assert_eq!(record.agent_name, "sumiller_specialist");
    assert_eq!(record.domains, vec![Domain::Wine]);
    assert_eq!(record.source, "RAG");
    assert_eq!(record.status, "answered");
    assert_eq!(
        record.retrievals,
        vec![RetrievalTrace {
            domain: Domain::Wine,
            tool: Some("query_wine_knowledge".to_string()),
            status: RetrievalStatus::Success,
        }]
    );
    assert!(record.rag_context.contains("Rías Baixas"));
}

#[tokio::test]
async fn test_trace_records_each_retrieval_status() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = create_indexes(temp_dir.path());
    config.knowledge.nutrition_index_path = temp_dir.path().join("no_existe");
    config.trace.enabled = true;
    let context = MaitreContext::new(config).unwrap();
    let mut session = SessionContext::new();

    let reply = context
        .coordinator
        .handle("Menú completo con salmón a la plancha", &mut session)
        .await;
    assert_eq!(reply.domain(), Domain::Multi);

    let record = TraceRecord::from_text(&reply.render()).unwrap();
    assert_eq!(record.agent_name, "gastronomy_coordinator");
    assert_eq!(
        record
            .retrievals
            .iter()
            .map(|r| (r.domain, r.status))
            .collect::<Vec<_>>(),
        vec![
            (Domain::Wine, RetrievalStatus::Success),
            (Domain::Culinary, RetrievalStatus::Partial),
            (Domain::Nutrition, RetrievalStatus::Error),
        ]
    );
}

struct QuotaExhausted;

#[async_trait]
impl Narrator for QuotaExhausted {
    async fn narrate(
        &self,
        _request: &NarrationRequest<'_>,
        _specialists: &[Arc<Specialist>],
    ) -> anyhow::Result<String> {
        Err(anyhow::anyhow!("429 Too Many Requests: quota exceeded"))
    }
}

#[tokio::test]
async fn test_rate_limit_is_reported_politely() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_indexes(temp_dir.path());
    let coordinator = Coordinator::new(SpecialistRegistry::from_config(&config), InteractionLog::new())
        .with_narrator(Arc::new(QuotaExhausted));
    let mut session = SessionContext::new();

    let first = coordinator
        .handle("¿Cuánta fibra tienen las legumbres?", &mut session)
        .await;
    let second = coordinator
        .handle("¿Cuánta fibra tienen las legumbres?", &mut session)
        .await;

    assert_eq!(first.status, ReplyStatus::RateLimited { retry_after: 60 });
    assert_eq!(second.status, ReplyStatus::RateLimited { retry_after: 60 });
    assert_ne!(first.text, second.text);
    assert!(!first.text.contains("429"));
}
