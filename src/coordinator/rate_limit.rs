use std::sync::atomic::{AtomicUsize, Ordering};

/// 建议的重试等待时间（秒）
pub const RETRY_AFTER_SECS: u64 = 60;

/// 上游配额耗尽时错误文本中常见的标记，匹配时忽略大小写
const RATE_LIMIT_MARKERS: [&str; 6] = [
    "429",
    "resource_exhausted",
    "resource exhausted",
    "rate limit",
    "quota exceeded",
    "too many requests",
];

const FRIENDLY_MESSAGES: [&str; 4] = [
    "⏳ **Nivel gratuito de la app** - Está utilizando el nivel gratuito del Maître Digital. Para evitar saturar los servidores, espere un minuto y vuelva a intentarlo. ¡Su consulta gastronómica será procesada en breve! 🍷✨",
    "🍷 **Paciencia, estimado comensal** - Nuestro sistema gratuito está procesando muchas consultas. Como un buen vino, las mejores respuestas requieren un poco de tiempo. Inténtelo nuevamente en unos momentos. 🎩",
    "🥗 **Servicio premium en preparación** - El nivel gratuito tiene límites para garantizar un servicio de calidad para todos. Por favor, espere un minuto antes de continuar. ¡Nuestro equipo gastronómico le atenderá pronto! 🍳",
    "⭐ **Experiencia gastronómica gratuita** - Para mantener la calidad del servicio, limitamos las consultas simultáneas. Espere un momento y podrá disfrutar de nuestras recomendaciones culinarias. 🌟",
];

const GENERIC_FAILURE: &str = "Lo lamento, no he podido completar su consulta en este momento. Por favor, inténtelo de nuevo en unos instantes o reformule su pregunta.";

/// 上游失败的分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureOutcome {
    /// 配额耗尽，建议稍后重试
    RateLimited { message: String, retry_after: u64 },
    /// 其他错误
    Error { message: String },
}

/// 错误文本是否表示上游限流
pub fn is_rate_limit_error(error: &str) -> bool {
    let lowered = error.to_lowercase();
    RATE_LIMIT_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

/// 将上游错误分类，限流时轮换提示语
#[derive(Debug, Default)]
pub struct RateLimitClassifier {
    next_message: AtomicUsize,
}

impl RateLimitClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify(&self, error: &str) -> FailureOutcome {
        if is_rate_limit_error(error) {
            FailureOutcome::RateLimited {
                message: self.friendly_message().to_string(),
                retry_after: RETRY_AFTER_SECS,
            }
        } else {
            FailureOutcome::Error {
                message: GENERIC_FAILURE.to_string(),
            }
        }
    }

    fn friendly_message(&self) -> &'static str {
        let index = self.next_message.fetch_add(1, Ordering::Relaxed);
        FRIENDLY_MESSAGES[index % FRIENDLY_MESSAGES.len()]
    }
}
