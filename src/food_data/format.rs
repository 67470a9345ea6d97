use super::{FoodItem, FoodSearch};

/// 每次最多展示的食品条数
pub const MAX_FOODS: usize = 3;

/// 展示的关键营养素，顺序固定
pub const KEY_NUTRIENTS: [&str; 6] = [
    "Calorías",
    "Proteína",
    "Carbohidratos",
    "Grasas totales",
    "Fibra",
    "Sodio",
];

const NOT_AVAILABLE: &str = "No disponible";

/// 把搜索结果渲染为可读文本；没有食品时返回None
pub fn format_food_search(search: &FoodSearch) -> Option<String> {
    if search.response.foods.is_empty() {
        return None;
    }

    let mut blocks = Vec::new();
    if let Some(note) = search.translation_note() {
        blocks.push(format!("📝 {}", note));
    }

    blocks.extend(
        search
            .response
            .foods
            .iter()
            .take(MAX_FOODS)
            .map(format_food),
    );

    Some(blocks.join("\n\n"))
}

fn format_food(food: &FoodItem) -> String {
    let mut lines = vec![
        format!(
            "**{}**",
            food.description.as_deref().unwrap_or("Sin nombre")
        ),
        format!(
            "- FDC ID: {}",
            food.fdc_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "N/A".to_string())
        ),
        format!("- Tipo: {}", food.data_type.as_deref().unwrap_or("N/A")),
        "- Nutrientes principales:".to_string(),
    ];

    let values = key_nutrient_values(food);
    for (label, value) in KEY_NUTRIENTS.iter().zip(values) {
        lines.push(format!(
            "  - {}: {}",
            label,
            value.as_deref().unwrap_or(NOT_AVAILABLE)
        ));
    }

    lines.join("\n")
}

/// 按名称匹配关键营养素，同一营养素以第一次出现的值为准
fn key_nutrient_values(food: &FoodItem) -> [Option<String>; 6] {
    let mut values: [Option<String>; 6] = Default::default();

    for nutrient in &food.food_nutrients {
        let Some(value) = nutrient.value else {
            continue;
        };
        let name = nutrient
            .nutrient_name
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();
        let Some(slot) = classify(&name) else {
            continue;
        };
        if values[slot].is_some() {
            continue;
        }

        values[slot] = Some(match slot {
            0 => format!(
                "{} {}",
                value,
                nutrient.unit_name.as_deref().unwrap_or_default()
            )
            .trim_end()
            .to_string(),
            5 => format!("{}mg", value),
            _ => format!("{}g", value),
        });
    }

    values
}

fn classify(name: &str) -> Option<usize> {
    if name.contains("energy") || name.contains("calorie") {
        Some(0)
    } else if name.contains("protein") {
        Some(1)
    } else if name.contains("carbohydrate") && name.contains("by difference") {
        Some(2)
    } else if name.contains("total lipid") || (name.contains("fat") && !name.contains("saturated"))
    {
        Some(3)
    } else if name.contains("fiber") {
        Some(4)
    } else if name.contains("sodium") {
        Some(5)
    } else {
        None
    }
}
