use anyhow::Result;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::config::Config;
use crate::coordinator::context::MaitreContext;
use crate::coordinator::{Reply, ReplyStatus, SessionContext};

/// 交互模式下的一行输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Exit,
    /// 显示会话上下文摘要
    Context,
    /// 记录偏好 `:pref clave=valor`
    Preference { key: String, value: String },
    Query(String),
    Empty,
    Invalid(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" => ReplCommand::Empty,
            "salir" | "exit" | ":salir" | ":exit" => ReplCommand::Exit,
            ":contexto" => ReplCommand::Context,
            _ => {
                if let Some(rest) = line.strip_prefix(":pref") {
                    return match rest.trim().split_once('=') {
                        Some((key, value)) if !key.trim().is_empty() => ReplCommand::Preference {
                            key: key.trim().to_string(),
                            value: value.trim().to_string(),
                        },
                        _ => ReplCommand::Invalid("uso: :pref clave=valor".to_string()),
                    };
                }
                if line.starts_with(':') {
                    return ReplCommand::Invalid(format!("comando desconocido: {}", line));
                }
                ReplCommand::Query(line.to_string())
            }
        }
    }
}

/// 启动数字领班：有查询时回答一次后退出，否则进入交互模式
pub async fn launch(config: &Config, query: Option<&str>) -> Result<()> {
    let context = MaitreContext::new(config.clone())?;

    println!("🎩 Maître Digital listo");
    print!("{}", context.availability_report());

    let mut session = SessionContext::new();
    match query {
        Some(query) => {
            answer(&context, query, &mut session).await;
        }
        None => repl(&context, &mut session).await?,
    }

    tracing::info!(
        session = %session.id(),
        interactions = context.history.len().await,
        "session finished"
    );
    Ok(())
}

async fn repl(context: &MaitreContext, session: &mut SessionContext) -> Result<()> {
    println!("💬 Escriba su consulta gastronómica (\"salir\" para terminar, \":contexto\" para ver el contexto)");

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all("\n> ".as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match ReplCommand::parse(&line) {
            ReplCommand::Exit => break,
            ReplCommand::Empty => continue,
            ReplCommand::Context => {
                println!("{}", context.coordinator.conversation_context(session).await)
            }
            ReplCommand::Preference { key, value } => {
                println!("📝 Preferencia registrada: {} = {}", key, value);
                session.set_preference(key, value);
            }
            ReplCommand::Invalid(message) => eprintln!("⚠️ {}", message),
            ReplCommand::Query(query) => {
                answer(context, &query, session).await;
            }
        }
    }

    println!("👋 ¡Gracias por su visita!");
    Ok(())
}

async fn answer(context: &MaitreContext, query: &str, session: &mut SessionContext) -> Reply {
    let start = Instant::now();
    let reply = context.coordinator.handle(query, session).await;

    println!("\n{}", reply.render());
    if let ReplyStatus::RateLimited { retry_after } = reply.status {
        println!("⏳ Reintente en {} s", retry_after);
    }

    tracing::info!(
        domain = %reply.domain(),
        status = reply.status.as_str(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "query answered"
    );
    reply
}
