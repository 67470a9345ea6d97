//! 意图路由：基于关键词子串匹配的领域分类

use crate::types::{Domain, RoutingDecision};

/// 某个领域的关键词集合
pub struct KeywordSet {
    pub domain: Domain,
    pub keywords: &'static [&'static str],
}

/// 单一领域的关键词，按优先级排列
pub const SPECIALTY_KEYWORDS: [KeywordSet; 3] = [
    KeywordSet {
        domain: Domain::Wine,
        keywords: &[
            "vino",
            "maridaje",
            "bodega",
            "albariño",
            "tinto",
            "blanco",
            "rosado",
            "espumoso",
            "champagne",
            "cava",
            "sommelier",
            "cata",
        ],
    },
    KeywordSet {
        domain: Domain::Culinary,
        keywords: &[
            "receta",
            "cocina",
            "ingrediente",
            "preparación",
            "chef",
            "plato",
            "cocinar",
            "hacer",
            "como se hace",
            "técnica",
            "saltear",
            "brasear",
        ],
    },
    KeywordSet {
        domain: Domain::Nutrition,
        keywords: &[
            "caloría",
            "nutrición",
            "vitamina",
            "dieta",
            "salud",
            "proteína",
            "carbohidrato",
            "grasa",
            "fibra",
            "mineral",
            "nutricional",
        ],
    },
];

/// 跨领域的组合短语，以及各自涉及的专家
pub const MULTI_DOMAIN_PHRASES: [(&str, &[Domain]); 7] = [
    ("vino con", &[Domain::Wine, Domain::Culinary]),
    ("maridaje con", &[Domain::Wine, Domain::Culinary]),
    ("acompañar con", &[Domain::Wine, Domain::Culinary]),
    ("dieta y vino", &[Domain::Wine, Domain::Nutrition]),
    ("receta nutritiva", &[Domain::Culinary, Domain::Nutrition]),
    ("plato saludable", &[Domain::Culinary, Domain::Nutrition]),
    (
        "menú completo",
        &[Domain::Wine, Domain::Culinary, Domain::Nutrition],
    ),
];

const GREETING: &str = "Bienvenido/a, soy Claude, su Maître Digital. ";

const GENERAL_GUIDANCE: &str = "Me complace recibir su consulta. Para brindarle el mejor servicio posible, ¿podría especificar más sobre qué aspecto gastronómico le interesa?\n\n\
Puedo coordinar con nuestros especialistas para asistirle con:\n\
🍷 **Vinos y maridajes** - Nuestro sumiller experto\n\
🍳 **Cocina y recetas** - Nuestro chef especialista\n\
🥗 **Nutrición y salud** - Nuestro nutricionista certificado\n\n\
Como Maître Digital, mi rol es coordinar la experiencia gastronómica perfecta para usted.";

/// 开场白中的领域确认与转交说明，以及委派原因
fn domain_messages(domain: Domain) -> (&'static str, &'static str) {
    match domain {
        Domain::Wine => (
            "Excelente consulta sobre vinos y maridajes. 🍷 Permíteme consultar con nuestro sumiller especialista para ofrecerle la mejor recomendación...\n\n",
            "Consulta especializada en vinos y maridajes",
        ),
        Domain::Culinary => (
            "Una consulta culinaria fascinante. 🍳 Consultaré con nuestro chef especialista para proporcionarle información culinaria experta...\n\n",
            "Consulta especializada en cocina y recetas",
        ),
        Domain::Nutrition => (
            "Una consulta muy importante sobre nutrición y salud. 🥗 Consultaré con nuestro nutricionista especialista para proporcionarle información nutricional precisa...\n\n",
            "Consulta especializada en nutrición y salud",
        ),
        Domain::Multi => (
            "Una consulta gastronómica integral muy interesante. 🍽️ Esto requiere la coordinación de múltiples especialistas. Permíteme organizar una respuesta completa...\n\n",
            "Consulta que requiere múltiples especialistas",
        ),
        Domain::General => (GENERAL_GUIDANCE, "Consulta general requiere aclaración"),
    }
}

/// 对查询进行路由
///
/// 大小写不敏感的子串匹配，固定优先级：酒 → 烹饪 → 营养 → 组合短语 → 通用。
/// 单一领域关键词优先于组合短语，因此 "receta nutritiva" 归入烹饪。
pub fn route(query: &str) -> RoutingDecision {
    let lowered = query.to_lowercase();

    for set in &SPECIALTY_KEYWORDS {
        if let Some(keyword) = set.keywords.iter().find(|k| lowered.contains(*k)) {
            return decision(set.domain, vec![set.domain], Some(*keyword));
        }
    }

    if let Some((phrase, domains)) = MULTI_DOMAIN_PHRASES
        .iter()
        .find(|(phrase, _)| lowered.contains(phrase))
    {
        return decision(Domain::Multi, domains.to_vec(), Some(*phrase));
    }

    decision(Domain::General, Vec::new(), None)
}

fn decision(domain: Domain, specialists: Vec<Domain>, keyword: Option<&str>) -> RoutingDecision {
    let (message, reason) = domain_messages(domain);
    RoutingDecision {
        domain,
        intro_text: format!("{}{}", GREETING, message),
        delegation_reason: reason.to_string(),
        specialists,
        matched_keyword: keyword.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wine_keyword_in_any_case() {
        for query in ["¿Qué VINO recomiendan?", "Un tinto, por favor", "CAVA"] {
            let decision = route(query);
            assert_eq!(decision.domain, Domain::Wine, "query: {}", query);
            assert_eq!(decision.specialists, vec![Domain::Wine]);
        }
    }

    #[test]
    fn test_salmon_wine_query_mentions_sommelier() {
        let decision = route("¿Qué vino recomiendan para el salmón?");
        assert_eq!(decision.domain, Domain::Wine);
        assert_eq!(decision.matched_keyword.as_deref(), Some("vino"));
        assert!(decision.intro_text.starts_with(GREETING));
        assert!(decision.intro_text.contains("sumiller"));
        assert_eq!(
            decision.delegation_reason,
            "Consulta especializada en vinos y maridajes"
        );
    }

    #[test]
    fn test_wine_takes_priority_over_culinary() {
        let decision = route("receta con vino tinto");
        assert_eq!(decision.domain, Domain::Wine);
    }

    #[test]
    fn test_culinary_and_nutrition() {
        assert_eq!(route("receta de paella").domain, Domain::Culinary);
        assert!(route("receta de paella").intro_text.contains("chef"));
        assert_eq!(route("¿Cuántas calorías tiene?").domain, Domain::Nutrition);
        assert_eq!(route("vitamina C").domain, Domain::Nutrition);
        assert!(route("vitamina C").intro_text.contains("nutricionista"));
    }

    #[test]
    fn test_single_domain_keyword_beats_multi_phrase() {
        let decision = route("receta nutritiva");
        assert_eq!(decision.domain, Domain::Culinary);
        assert_eq!(decision.matched_keyword.as_deref(), Some("receta"));
    }

    #[test]
    fn test_multi_phrase_without_single_keyword() {
        let decision = route("Menú completo para el sábado");
        assert_eq!(decision.domain, Domain::Multi);
        assert_eq!(
            decision.specialists,
            vec![Domain::Wine, Domain::Culinary, Domain::Nutrition]
        );
        assert!(decision.intro_text.contains("múltiples especialistas"));

        let decision = route("¿Qué puedo acompañar con jamón?");
        assert_eq!(decision.domain, Domain::Multi);
        assert_eq!(decision.specialists, vec![Domain::Wine, Domain::Culinary]);
    }

    #[test]
    fn test_empty_or_unmatched_is_general() {
        for query in ["", "   ", "Buenas tardes"] {
            let decision = route(query);
            assert_eq!(decision.domain, Domain::General);
            assert!(!decision.requires_specialists());
            assert!(decision.matched_keyword.is_none());

            let text = &decision.intro_text;
            assert!(text.contains("Vinos y maridajes"));
            assert!(text.contains("Cocina y recetas"));
            assert!(text.contains("Nutrición y salud"));
            assert_eq!(text.matches("**").count(), 6);
        }
    }
}
