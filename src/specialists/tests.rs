#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::food_data::{
        FoodDataError, FoodDataSource, FoodItem, FoodSearch, FoodSearchResponse,
    };
    use crate::knowledge::{KnowledgeError, KnowledgeIndex, Passage};
    use crate::specialists::*;
    use crate::types::{Domain, RetrievalStatus};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tempfile::TempDir;

    /// 忽略查询内容、按顺序返回预设文本的索引，并记录收到的查询
    struct StubIndex {
        passages: Vec<&'static str>,
        queries: Mutex<Vec<String>>,
    }

    impl StubIndex {
        fn new(passages: Vec<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                passages,
                queries: Mutex::new(Vec::new()),
            })
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl KnowledgeIndex for StubIndex {
        fn name(&self) -> &str {
            "stub"
        }

        async fn search(&self, query: &str, k: usize) -> Result<Vec<Passage>, KnowledgeError> {
            self.queries.lock().unwrap().push(query.to_string());
            Ok(self
                .passages
                .iter()
                .take(k)
                .map(|t| Passage::new(*t))
                .collect())
        }
    }

    enum StubFood {
        Foods(Vec<&'static str>),
        Failing,
    }

    #[async_trait]
    impl FoodDataSource for StubFood {
        async fn search_foods(
            &self,
            query: &str,
            _data_types: &[String],
            _page_size: usize,
        ) -> Result<FoodSearch, FoodDataError> {
            match self {
                StubFood::Foods(names) => Ok(FoodSearch {
                    original_query: query.to_string(),
                    translated_query: query.to_string(),
                    response: FoodSearchResponse {
                        foods: names
                            .iter()
                            .map(|n| FoodItem {
                                description: Some(n.to_string()),
                                fdc_id: Some(1),
                                ..FoodItem::default()
                            })
                            .collect(),
                        total_hits: None,
                    },
                }),
                StubFood::Failing => Err(FoodDataError::Status {
                    status: 503,
                    body: "servicio no disponible".to_string(),
                }),
            }
        }
    }

    const TIMEOUT: Duration = Duration::from_secs(2);

    fn specialist(domain: Domain, index: Option<Arc<StubIndex>>, k: usize) -> Specialist {
        let profile = SpecialistProfile::for_domain(domain).unwrap();
        let index = index.map(|i| i as Arc<dyn KnowledgeIndex>);
        Specialist::new(profile, index, k, TIMEOUT)
    }

    fn nutritionist(index: Option<Arc<StubIndex>>, food: Option<StubFood>) -> Specialist {
        let specialist = specialist(Domain::Nutrition, index, 2);
        match food {
            Some(food) => specialist.with_food_data(FoodDataAccess {
                source: Arc::new(food),
                data_types: vec![],
                page_size: 3,
            }),
            None => specialist,
        }
    }

    #[tokio::test]
    async fn test_sommelier_consult_formats_wine_knowledge() {
        let index = StubIndex::new(vec!["El salmón marida con un albariño fresco."]);
        let sommelier = specialist(Domain::Wine, Some(index), 3);

        let result = sommelier.consult("¿Qué vino recomiendan para el salmón?").await;

        assert_eq!(result.status(), RetrievalStatus::Success);
        assert_eq!(result.source(), Some("enology_knowledge_base"));
        assert_eq!(
            result.context(),
            "--- CONOCIMIENTO ENOLÓGICO 1 ---\nEl salmón marida con un albariño fresco."
        );
    }

    #[tokio::test]
    async fn test_pairing_expands_query_and_filters() {
        let index = StubIndex::new(vec![
            "Historia de la bodega familiar",
            "Para maridar el cordero, un tinto de Ribera",
            "Notas de cata",
        ]);
        let sommelier = specialist(Domain::Wine, Some(index.clone()), 3);

        let result = sommelier
            .invoke(Capability::RecommendWinePairing, "cordero asado")
            .await;

        assert_eq!(result.status(), RetrievalStatus::Success);
        assert_eq!(result.source(), Some("wine_pairing_expertise"));
        assert_eq!(
            result.context(),
            "--- MARIDAJE RECOMENDADO 1 ---\nPara maridar el cordero, un tinto de Ribera"
        );
        assert_eq!(
            index.queries(),
            vec!["maridaje cordero asado vino recomendación".to_string()]
        );
    }

    #[tokio::test]
    async fn test_capability_of_other_domain_is_rejected() {
        let chef = specialist(Domain::Culinary, Some(StubIndex::new(vec!["x"])), 2);
        let result = chef.invoke(Capability::RecommendWinePairing, "salmón").await;
        assert_eq!(result.status(), RetrievalStatus::Error);
        assert!(result.context().contains("recommend_wine_pairing"));
    }

    #[tokio::test]
    async fn test_chef_without_index_is_unavailable() {
        let chef = specialist(Domain::Culinary, None, 2);
        let result = chef.consult("receta de paella").await;
        assert_eq!(result.status(), RetrievalStatus::Error);
        assert!(result.context().contains("culinaria no está disponible"));
        assert!(result.context().contains("Como chef"));
    }

    #[tokio::test]
    async fn test_recipe_details_fall_back_to_raw_query() {
        let index = StubIndex::new(vec!["La paella nació en Valencia", "Arroz bomba"]);
        let chef = specialist(Domain::Culinary, Some(index.clone()), 2);

        let result = chef.invoke(Capability::GetRecipeDetails, "paella").await;

        assert_eq!(result.status(), RetrievalStatus::Success);
        assert!(result.context().starts_with("--- INFORMACIÓN CULINARIA 1 ---"));
        assert_eq!(
            index.queries(),
            vec![
                "receta paella preparación ingredientes pasos".to_string(),
                "paella".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_technique_without_matches_is_partial() {
        let index = StubIndex::new(vec!["La paella nació en Valencia"]);
        let chef = specialist(Domain::Culinary, Some(index), 2);

        let result = chef
            .invoke(Capability::SuggestCookingTechnique, "confitar")
            .await;

        assert_eq!(result.status(), RetrievalStatus::Partial);
        assert!(result.context().contains("'confitar'"));
        assert!(result.context().contains("saltear"));
    }

    #[tokio::test]
    async fn test_usda_data_without_source_is_error() {
        let nutritionist = nutritionist(None, None);
        let result = nutritionist
            .invoke(Capability::GetUsdaNutritionData, "salmón")
            .await;
        assert_eq!(result.status(), RetrievalStatus::Error);
        assert!(!result.context().is_empty());
    }

    #[tokio::test]
    async fn test_usda_data_outcomes() {
        let found = nutritionist(None, Some(StubFood::Foods(vec!["Salmon, raw"])));
        let result = found
            .invoke(Capability::GetUsdaNutritionData, "salmon")
            .await;
        assert_eq!(result.status(), RetrievalStatus::Success);
        assert_eq!(result.source(), Some("USDA_FoodData_Central_API"));
        assert!(result.context().contains("**Salmon, raw**"));

        let empty = nutritionist(None, Some(StubFood::Foods(vec![])));
        let result = empty.invoke(Capability::GetUsdaNutritionData, "kale").await;
        assert_eq!(result.status(), RetrievalStatus::Partial);
        assert!(result.context().contains("'kale'"));

        let failing = nutritionist(None, Some(StubFood::Failing));
        let result = failing
            .invoke(Capability::GetUsdaNutritionData, "kale")
            .await;
        assert_eq!(result.status(), RetrievalStatus::Error);
        assert!(result.context().contains("503"));
    }

    #[tokio::test]
    async fn test_analysis_survives_one_failing_source() {
        let index = StubIndex::new(vec!["El arroz aporta carbohidratos complejos."]);
        let nutritionist = nutritionist(Some(index), Some(StubFood::Failing));

        let result = nutritionist
            .invoke(Capability::AnalyzeNutritionalContent, "arroz y pollo")
            .await;

        assert_eq!(result.status(), RetrievalStatus::Success);
        assert_eq!(result.source(), Some("nutritional_analysis_combined"));
        assert!(
            result
                .context()
                .starts_with("=== ANÁLISIS NUTRICIONAL ESPECIALIZADO ===\n--- ANÁLISIS NUTRICIONAL 1 ---")
        );
        assert!(!result.context().contains("USDA"));
    }

    #[tokio::test]
    async fn test_analysis_combines_both_sources() {
        let index = StubIndex::new(vec!["El pollo es rico en proteínas."]);
        let nutritionist = nutritionist(Some(index), Some(StubFood::Foods(vec!["Chicken"])));

        let result = nutritionist
            .invoke(Capability::AnalyzeNutritionalContent, "pollo")
            .await;

        assert!(result.context().contains("=== ANÁLISIS NUTRICIONAL ESPECIALIZADO ==="));
        assert!(result.context().contains("=== DATOS NUTRICIONALES USDA ===\n**Chicken**"));
    }

    #[tokio::test]
    async fn test_analysis_without_sources_is_partial() {
        let nutritionist = nutritionist(None, None);
        let result = nutritionist
            .invoke(Capability::AnalyzeNutritionalContent, "quinoa")
            .await;
        assert_eq!(result.status(), RetrievalStatus::Partial);
        assert!(result.context().contains("'quinoa'"));
    }

    #[test]
    fn test_specialist_capabilities_and_k() {
        let sommelier = specialist(Domain::Wine, None, 0);
        assert_eq!(sommelier.default_k(), 1);
        assert_eq!(
            sommelier.capabilities(),
            vec![
                Capability::QueryWineKnowledge,
                Capability::RecommendWinePairing
            ]
        );
        assert_eq!(sommelier.profile().agent_name, "sumiller_specialist");
    }

    #[test]
    fn test_registry_from_config_reports_available_indexes() {
        let temp_dir = TempDir::new().unwrap();
        let wine_path = temp_dir.path().join("vinos.txt");
        std::fs::write(&wine_path, "El albariño es un vino blanco gallego.").unwrap();

        let mut config = Config::default();
        config.food_data.enabled = false;
        config.knowledge.wine_index_path = wine_path;
        config.knowledge.culinary_index_path = temp_dir.path().join("missing_culinary");
        config.knowledge.nutrition_index_path = temp_dir.path().join("missing_nutrition");

        let registry = SpecialistRegistry::from_config(&config);

        assert_eq!(registry.iter().count(), 3);
        assert_eq!(registry.available_domains(), vec![Domain::Wine]);
        assert!(registry.get(Domain::Culinary).is_some());
        assert!(registry.get(Domain::General).is_none());
    }
}
