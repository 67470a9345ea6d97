/// 西班牙语到英语的常见食材词表，顺序即子串匹配的优先级
pub const FOOD_TERMS: &[(&str, &str)] = &[
    ("salmón", "salmon"),
    ("salmon", "salmon"),
    ("pollo", "chicken"),
    ("pechuga de pollo", "chicken breast"),
    ("pecho de pollo", "chicken breast"),
    ("ternera", "beef"),
    ("carne de res", "beef"),
    ("cerdo", "pork"),
    ("pescado", "fish"),
    ("atún", "tuna"),
    ("bacalao", "cod"),
    ("merluza", "hake"),
    ("arroz", "rice"),
    ("pasta", "pasta"),
    ("pan", "bread"),
    ("huevo", "egg"),
    ("huevos", "eggs"),
    ("leche", "milk"),
    ("queso", "cheese"),
    ("yogur", "yogurt"),
    ("mantequilla", "butter"),
    ("aceite", "oil"),
    ("aceite de oliva", "olive oil"),
    ("tomate", "tomato"),
    ("tomates", "tomatoes"),
    ("cebolla", "onion"),
    ("ajo", "garlic"),
    ("patata", "potato"),
    ("papa", "potato"),
    ("patatas", "potatoes"),
    ("papas", "potatoes"),
    ("zanahoria", "carrot"),
    ("brócoli", "broccoli"),
    ("espinacas", "spinach"),
    ("lechuga", "lettuce"),
    ("manzana", "apple"),
    ("naranja", "orange"),
    ("plátano", "banana"),
    ("fresa", "strawberry"),
    ("fresas", "strawberries"),
    ("uva", "grape"),
    ("uvas", "grapes"),
    ("almendras", "almonds"),
    ("nueces", "walnuts"),
    ("avena", "oats"),
    ("quinoa", "quinoa"),
    ("lentejas", "lentils"),
    ("garbanzos", "chickpeas"),
    ("frijoles", "beans"),
    ("judías", "beans"),
];

/// 将查询翻译为英文
///
/// 先对小写去空白后的查询做整词匹配，再按词表顺序找第一个被包含的词条，都没有时原样返回。
pub fn translate_query(query: &str) -> String {
    let normalized = query.trim().to_lowercase();

    if let Some((_, english)) = FOOD_TERMS.iter().find(|(spanish, _)| *spanish == normalized) {
        return english.to_string();
    }

    FOOD_TERMS
        .iter()
        .find(|(spanish, _)| normalized.contains(spanish))
        .map(|(_, english)| english.to_string())
        .unwrap_or_else(|| query.to_string())
}
