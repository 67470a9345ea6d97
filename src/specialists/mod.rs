//! 专家Agent - 每个领域一个参数化的专家，绑定自己的知识库与能力

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::food_data::{FoodDataSource, UsdaClient};
use crate::knowledge::{self, KnowledgeIndex};
use crate::types::{Domain, RetrievalResult};

pub mod capability;
pub mod chef;
pub mod nutritionist;
pub mod sommelier;

pub use capability::Capability;

/// 专家的静态描述
#[derive(Debug)]
pub struct SpecialistProfile {
    pub domain: Domain,
    /// 知识库名称，用于日志
    pub index_name: &'static str,
    /// 对外的Agent名称，写入追踪信息
    pub agent_name: &'static str,
    /// 会话上下文中记录的咨询原因
    pub interaction_reason: &'static str,
    /// 多领域回答中该专家小节的标题
    pub section_title: &'static str,
    /// 单领域回答中引出检索内容的句子
    pub framing: &'static str,
    /// 专家Agent的系统提示词
    pub preamble: &'static str,
}

impl SpecialistProfile {
    pub fn for_domain(domain: Domain) -> Option<&'static SpecialistProfile> {
        match domain {
            Domain::Wine => Some(&sommelier::PROFILE),
            Domain::Culinary => Some(&chef::PROFILE),
            Domain::Nutrition => Some(&nutritionist::PROFILE),
            Domain::Multi | Domain::General => None,
        }
    }
}

/// 食品数据来源以及查询参数
#[derive(Clone)]
pub struct FoodDataAccess {
    pub source: Arc<dyn FoodDataSource>,
    pub data_types: Vec<String>,
    pub page_size: usize,
}

/// 某个领域的专家
///
/// 知识库可能缺失，此时所有检索能力返回 error 结果而不是失败。
pub struct Specialist {
    profile: &'static SpecialistProfile,
    index: Option<Arc<dyn KnowledgeIndex>>,
    food_data: Option<FoodDataAccess>,
    default_k: usize,
    search_timeout: Duration,
}

impl Specialist {
    pub fn new(
        profile: &'static SpecialistProfile,
        index: Option<Arc<dyn KnowledgeIndex>>,
        default_k: usize,
        search_timeout: Duration,
    ) -> Self {
        Self {
            profile,
            index,
            food_data: None,
            default_k: default_k.max(1),
            search_timeout,
        }
    }

    /// 附加食品数据来源（仅营养师使用）
    pub fn with_food_data(mut self, food_data: FoodDataAccess) -> Self {
        self.food_data = Some(food_data);
        self
    }

    pub fn profile(&self) -> &'static SpecialistProfile {
        self.profile
    }

    pub fn domain(&self) -> Domain {
        self.profile.domain
    }

    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    pub fn default_k(&self) -> usize {
        self.default_k
    }

    pub(crate) fn index(&self) -> Option<&dyn KnowledgeIndex> {
        self.index.as_deref()
    }

    pub(crate) fn food_data(&self) -> Option<&FoodDataAccess> {
        self.food_data.as_ref()
    }

    pub(crate) fn search_timeout(&self) -> Duration {
        self.search_timeout
    }

    /// 该专家提供的能力
    pub fn capabilities(&self) -> Vec<Capability> {
        Capability::for_domain(self.domain())
    }

    /// 用默认的主检索能力回答查询
    pub async fn consult(&self, query: &str) -> RetrievalResult {
        match Capability::primary(self.domain()) {
            Some(capability) => self.invoke(capability, query).await,
            None => RetrievalResult::error(
                format!("No hay un especialista para el dominio {}.", self.domain()),
                query,
            ),
        }
    }

    /// 调用一项能力；不属于本专家的能力返回 error 结果
    pub async fn invoke(&self, capability: Capability, input: &str) -> RetrievalResult {
        if capability.domain() != self.domain() {
            return RetrievalResult::error(
                format!(
                    "La herramienta {} no pertenece al {}.",
                    capability.id(),
                    self.profile.agent_name
                ),
                input,
            );
        }

        tracing::debug!(agent = self.profile.agent_name, capability = %capability, "invoking capability");

        match capability {
            Capability::QueryWineKnowledge => sommelier::query_wine_knowledge(self, input).await,
            Capability::RecommendWinePairing => sommelier::recommend_wine_pairing(self, input).await,
            Capability::QueryCulinaryKnowledge => chef::query_culinary_knowledge(self, input).await,
            Capability::GetRecipeDetails => chef::get_recipe_details(self, input).await,
            Capability::SuggestCookingTechnique => {
                chef::suggest_cooking_technique(self, input).await
            }
            Capability::QueryNutritionKnowledge => {
                nutritionist::query_nutrition_knowledge(self, input).await
            }
            Capability::GetUsdaNutritionData => {
                nutritionist::get_usda_nutrition_data(self, input).await
            }
            Capability::AnalyzeNutritionalContent => {
                nutritionist::analyze_nutritional_content(self, input).await
            }
        }
    }
}

/// 启动时构建的专家集合，运行期间只读
#[derive(Clone, Default)]
pub struct SpecialistRegistry {
    specialists: Vec<Arc<Specialist>>,
}

impl SpecialistRegistry {
    pub fn new(specialists: Vec<Specialist>) -> Self {
        Self {
            specialists: specialists.into_iter().map(Arc::new).collect(),
        }
    }

    /// 按配置加载三个领域的知识库并创建专家；缺失的知识库只记录日志
    pub fn from_config(config: &Config) -> Self {
        let timeout = Duration::from_millis(config.knowledge.search_timeout_ms);

        let food_data = if config.food_data.enabled {
            match UsdaClient::new(&config.food_data) {
                Ok(client) => Some(FoodDataAccess {
                    source: Arc::new(client),
                    data_types: config.food_data.data_types.clone(),
                    page_size: config.food_data.page_size,
                }),
                Err(e) => {
                    tracing::error!(error = %e, "failed to create USDA client");
                    eprintln!("❌ No se pudo crear el cliente USDA: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let specialists = Domain::SPECIALTIES
            .into_iter()
            .filter_map(|domain| {
                let profile = SpecialistProfile::for_domain(domain)?;
                let path = config.knowledge.index_path(domain)?;
                let index = knowledge::load_index(profile.index_name, path);
                let specialist = Specialist::new(
                    profile,
                    index,
                    config.knowledge.default_k(domain),
                    timeout,
                );
                Some(match (domain, &food_data) {
                    (Domain::Nutrition, Some(access)) => specialist.with_food_data(access.clone()),
                    _ => specialist,
                })
            })
            .collect();

        Self::new(specialists)
    }

    pub fn get(&self, domain: Domain) -> Option<&Arc<Specialist>> {
        self.specialists.iter().find(|s| s.domain() == domain)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Specialist>> {
        self.specialists.iter()
    }

    /// 已加载知识库的领域
    pub fn available_domains(&self) -> Vec<Domain> {
        self.specialists
            .iter()
            .filter(|s| s.has_index())
            .map(|s| s.domain())
            .collect()
    }
}

// Include tests
#[cfg(test)]
mod tests;
