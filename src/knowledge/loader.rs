//! 知识库文档加载：纯文本分段，以及酒单、菜单等结构化JSON

use regex::Regex;
use serde_json::Value;
use std::path::Path;
use std::sync::LazyLock;
use walkdir::WalkDir;

use super::{KnowledgeError, Passage};

/// 单段文本的最大字符数
pub const MAX_CHUNK_CHARS: usize = 1500;

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid paragraph pattern"));

/// 从文件或目录加载全部文本段
///
/// 目录模式下，无法解析的文件会被跳过并记录警告；
/// 只有当所有候选文件都失败时才返回第一个错误。
pub fn load_passages(path: &Path) -> Result<Vec<Passage>, KnowledgeError> {
    if path.is_file() {
        return load_file(path);
    }

    let mut passages = Vec::new();
    let mut loaded = 0usize;
    let mut first_error = None;
    let walker = WalkDir::new(path).sort_by_file_name().follow_links(true);
    for entry in walker {
        let entry = entry.map_err(|e| KnowledgeError::Format {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if !entry.file_type().is_file() || !is_supported(entry.path()) {
            continue;
        }
        match load_file(entry.path()) {
            Ok(file_passages) => {
                loaded += 1;
                passages.extend(file_passages);
            }
            Err(e) => {
                tracing::warn!(file = %entry.path().display(), error = %e, "skipping knowledge file");
                eprintln!("⚠️ Se omite el archivo {}: {}", entry.path().display(), e);
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) if loaded == 0 => Err(e),
        _ => Ok(passages),
    }
}

fn is_supported(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("txt") | Some("md") | Some("json")
    )
}

fn load_file(path: &Path) -> Result<Vec<Passage>, KnowledgeError> {
    let content = std::fs::read_to_string(path).map_err(|source| KnowledgeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let source_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => {
            let value: Value =
                serde_json::from_str(&content).map_err(|e| KnowledgeError::Format {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
            let texts = json_documents(&value).ok_or_else(|| KnowledgeError::Format {
                path: path.display().to_string(),
                message: "estructura JSON no reconocida".to_string(),
            })?;
            Ok(texts
                .into_iter()
                .map(|text| Passage::with_source(text, source_name.clone()))
                .collect())
        }
        _ => Ok(chunk_text(&content, MAX_CHUNK_CHARS)
            .into_iter()
            .map(|text| Passage::with_source(text, source_name.clone()))
            .collect()),
    }
}

/// 按段落切分文本，相邻的短段落合并，单段不超过 `max_chars` 个字符
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();

    for paragraph in PARAGRAPH_BREAK.split(text) {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }

        for piece in split_long(paragraph, max_chars) {
            let needed = if current.is_empty() {
                piece.chars().count()
            } else {
                current.chars().count() + 2 + piece.chars().count()
            };
            if needed > max_chars && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push_str("\n\n");
            }
            current.push_str(&piece);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// 超长段落按空白切开
fn split_long(paragraph: &str, max_chars: usize) -> Vec<String> {
    if paragraph.chars().count() <= max_chars {
        return vec![paragraph.to_string()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    for word in paragraph.split_whitespace() {
        let len = current.chars().count();
        if len > 0 && len + 1 + word.chars().count() > max_chars {
            pieces.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// 识别结构化JSON并转为文本段；无法识别时返回None
fn json_documents(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    let mut documents = Vec::new();

    for item in items {
        match item {
            Value::String(text) => documents.push(text.clone()),
            Value::Object(map) if map.contains_key("nombre") => {
                documents.push(format_wine_higueron(item))
            }
            Value::Object(map) if map.contains_key("dishes") => {
                documents.extend(format_menu_category(item))
            }
            Value::Object(map) if map.contains_key("text") => {
                documents.push(field(item, "text"))
            }
            Value::Object(map) if map.contains_key("name") => {
                documents.push(format_wine_legacy(item))
            }
            _ => return None,
        }
    }
    Some(documents)
}

fn field(item: &Value, key: &str) -> String {
    match item.get(key) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Null) | None => "N/A".to_string(),
        Some(Value::String(_)) => "N/A".to_string(),
        Some(other) => other.to_string(),
    }
}

fn list_field(item: &Value, key: &str) -> String {
    match item.get(key) {
        Some(Value::Array(values)) if !values.is_empty() => values
            .iter()
            .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
            .collect::<Vec<_>>()
            .join(", "),
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => "N/A".to_string(),
    }
}

fn format_wine_higueron(vino: &Value) -> String {
    let mut content = format!("Nombre del Vino: {}\n", field(vino, "nombre"));
    content.push_str(&format!("Ubicación: {}\n", field(vino, "ubicación")));
    content.push_str(&format!("Categoría: {}\n", field(vino, "categoría")));
    content.push_str(&format!("Bodega: {}\n", field(vino, "bodega")));
    content.push_str(&format!("Variedad: {}\n", field(vino, "variedad")));
    if vino.get("precio_copa").is_some_and(|v| !v.is_null()) {
        content.push_str(&format!("Precio por copa: {}\n", field(vino, "precio_copa")));
    }
    if vino.get("precio_botella").is_some_and(|v| !v.is_null()) {
        content.push_str(&format!(
            "Precio por botella: {}\n",
            field(vino, "precio_botella")
        ));
    }
    content.push_str(&format!(
        "Descripción corta: {}\n",
        field(vino, "descripción_corta")
    ));
    content.push_str(&format!("Descripción: {}\n", field(vino, "descripción_larga")));
    content.push_str(&format!("Aromas: {}\n", list_field(vino, "aromas")));
    content.push_str(&format!("Elaboración: {}\n", list_field(vino, "elaboración")));
    content
}

fn format_wine_legacy(vino: &Value) -> String {
    let mut content = format!("Nombre del Vino: {}\n", field(vino, "name"));
    content.push_str(&format!(
        "Tipo: {}, Región: {}\n",
        field(vino, "type"),
        field(vino, "region")
    ));
    content.push_str(&format!("Bodega: {}\n", field(vino, "winery")));
    content.push_str(&format!("Graduación: {}% vol.\n", field(vino, "alcohol")));
    content.push_str(&format!("Precio: {}€\n", field(vino, "price")));
    content.push_str(&format!(
        "Temperatura de servicio: {}\n",
        field(vino, "temperature")
    ));
    content.push_str(&format!("Varietal: {}\n", field(vino, "grape")));
    content.push_str(&format!("Puntuación: {}/100\n", field(vino, "rating")));
    content.push_str(&format!("Crianza: {}\n", field(vino, "crianza")));
    content.push_str(&format!("Maridaje: {}\n", field(vino, "pairing")));
    content.push_str(&format!("Descripción: {}", field(vino, "description")));
    content
}

/// 一个菜单分类生成一段汇总文本，外加每道菜各一段
fn format_menu_category(category_data: &Value) -> Vec<String> {
    let category = match category_data.get("category").and_then(Value::as_str) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => "Sin categoría".to_string(),
    };
    let dishes = category_data
        .get("dishes")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let dish_fields = |dish: &Value| {
        let name = dish
            .get("dish_name")
            .and_then(Value::as_str)
            .unwrap_or("Sin nombre")
            .to_string();
        let description = dish
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("Sin descripción")
            .to_string();
        let price = match dish.get("price_eur") {
            Some(Value::Null) | None => "Sin precio".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        (name, description, price)
    };

    let mut summary = format!("CATEGORÍA: {}\n\n", category);
    for dish in &dishes {
        let (name, description, price) = dish_fields(dish);
        summary.push_str(&format!(
            "PLATO: {}\nDESCRIPCIÓN: {}\nPRECIO: {}€\n\n",
            name, description, price
        ));
    }

    let mut documents = vec![summary];
    for dish in &dishes {
        let (name, description, price) = dish_fields(dish);
        documents.push(format!(
            "CARTA DEL RESTAURANTE - {category}\n\nPLATO: {name}\nDESCRIPCIÓN: {description}\nPRECIO: {price}€\nCATEGORÍA: {category}\n"
        ));
    }
    documents
}
