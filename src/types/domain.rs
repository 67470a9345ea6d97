use serde::{Deserialize, Serialize};

/// 查询所属的美食领域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Domain {
    #[serde(rename = "wine")]
    Wine,
    #[serde(rename = "culinary")]
    Culinary,
    #[serde(rename = "nutrition")]
    Nutrition,
    #[serde(rename = "multi")]
    Multi,
    #[serde(rename = "general")]
    General,
}

impl Domain {
    /// 拥有专属专家与知识库的具体领域
    pub const SPECIALTIES: [Domain; 3] = [Domain::Wine, Domain::Culinary, Domain::Nutrition];

    /// 是否为单一专家领域
    pub fn is_specialty(&self) -> bool {
        matches!(self, Domain::Wine | Domain::Culinary | Domain::Nutrition)
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Domain::Wine => write!(f, "wine"),
            Domain::Culinary => write!(f, "culinary"),
            Domain::Nutrition => write!(f, "nutrition"),
            Domain::Multi => write!(f, "multi"),
            Domain::General => write!(f, "general"),
        }
    }
}

impl std::str::FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wine" | "vino" => Ok(Domain::Wine),
            "culinary" | "cocina" => Ok(Domain::Culinary),
            "nutrition" | "nutrición" | "nutricion" => Ok(Domain::Nutrition),
            "multi" => Ok(Domain::Multi),
            "general" => Ok(Domain::General),
            _ => Err(format!("Unknown domain: {}", s)),
        }
    }
}
