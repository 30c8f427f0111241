//! Command handlers: each runs against the repositories and writes its report to `out`.

use std::io::Write;

use anyhow::{Context, Result};
use storage::period::format_period;
use storage::{
    ensure_schema, Level, LevelRepository, Message, MessageRepository, ObjectLog,
    ObjectLogRepository, Repository, SqlitePoolManager, StorageError,
};
use tracing::info;

use crate::cli::{Commands, NameAction};

const DEFAULT_LEVELS: [&str; 4] = ["DEBUG", "INFO", "WARN", "ERROR"];
const TEXT_PREVIEW_LEN: usize = 80;

/// The three repositories sharing one pool.
#[derive(Clone)]
pub struct Repositories {
    pub messages: MessageRepository,
    pub levels: LevelRepository,
    pub objects: ObjectLogRepository,
}

impl Repositories {
    /// Opens `database_url` and makes sure the tables exist.
    pub async fn open(database_url: &str) -> Result<Self> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        ensure_schema(pool_manager.pool()).await?;
        Ok(Self::with_pool(pool_manager))
    }

    pub fn with_pool(pool_manager: SqlitePoolManager) -> Self {
        Self {
            messages: MessageRepository::with_pool(pool_manager.clone()),
            levels: LevelRepository::with_pool(pool_manager.clone()),
            objects: ObjectLogRepository::with_pool(pool_manager),
        }
    }
}

pub async fn execute<W: Write>(
    command: Commands,
    repos: &Repositories,
    page_size: i64,
    out: &mut W,
) -> Result<()> {
    match command {
        Commands::Init { seed_levels } => handle_init(repos, seed_levels, out).await,
        Commands::Level { action } => match action {
            NameAction::Add { name } => {
                let id = repos.levels.create(&Level::new(0, name.as_str())).await?;
                writeln!(out, "level {} -> {}", name, id)?;
                Ok(())
            }
            NameAction::List => {
                let levels = repos.levels.select_all().await?;
                for level in &levels {
                    writeln!(out, "{:<6} {}", level.id, level.name.as_deref().unwrap_or("-"))?;
                }
                Ok(())
            }
        },
        Commands::Object { action } => match action {
            NameAction::Add { name } => {
                let id = repos.objects.create(&ObjectLog::new(0, name.as_str())).await?;
                writeln!(out, "object {} -> {}", name, id)?;
                Ok(())
            }
            NameAction::List => {
                let objects = repos.objects.select_all().await?;
                for object in &objects {
                    writeln!(out, "{:<6} {}", object.id, object.name.as_deref().unwrap_or("-"))?;
                }
                Ok(())
            }
        },
        Commands::Log {
            level,
            object,
            text,
        } => handle_log(repos, &level, &object, text, out).await,
        Commands::List { json } => {
            let messages = repos.messages.select_all().await?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&messages)?)?;
            } else {
                print_messages(out, &messages.records)?;
            }
            Ok(())
        }
        Commands::Range {
            from,
            to,
            limit,
            offset,
            json,
        } => {
            let limit = limit.unwrap_or(page_size);
            let page = repos
                .messages
                .find_by_period(&from, &to, limit, offset)
                .await?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&page)?)?;
            } else {
                print_messages(out, &page.records)?;
                writeln!(
                    out,
                    "\n{} of {} message(s) between {} and {} (offset {})",
                    page.len(),
                    page.count.unwrap_or_default(),
                    format_period(&from),
                    format_period(&to),
                    offset
                )?;
            }
            Ok(())
        }
        Commands::Clear => {
            repos.messages.delete_all().await?;
            writeln!(out, "All messages deleted.")?;
            Ok(())
        }
    }
}

async fn handle_init<W: Write>(repos: &Repositories, seed_levels: bool, out: &mut W) -> Result<()> {
    if seed_levels {
        for name in DEFAULT_LEVELS {
            if repos.levels.find_by_name(name).await?.is_none() {
                let id = repos.levels.create(&Level::new(0, name)).await?;
                info!("Seeded level {} with id {}", name, id);
            }
        }
    }
    writeln!(out, "Schema ready.")?;
    Ok(())
}

async fn handle_log<W: Write>(
    repos: &Repositories,
    level: &str,
    object: &str,
    text: String,
    out: &mut W,
) -> Result<()> {
    let level = repos
        .levels
        .find_by_name(level)
        .await?
        .ok_or_else(|| StorageError::NotFound(format!("level {}", level)))?;
    let object = repos
        .objects
        .find_by_name(object)
        .await?
        .ok_or_else(|| StorageError::NotFound(format!("object {}", object)))?;

    let id = repos
        .messages
        .create(&Message::draft(level.id, object.id, text))
        .await
        .context("Create message")?;

    writeln!(out, "{}", id)?;
    Ok(())
}

fn print_messages<W: Write>(out: &mut W, messages: &[Message]) -> Result<()> {
    if messages.is_empty() {
        writeln!(out, "No messages.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<6} {:<19} {:<8} {:<16} {}",
        "id", "period", "level", "object", "text"
    )?;
    writeln!(out, "{}", "-".repeat(100))?;

    for m in messages {
        writeln!(
            out,
            "{:<6} {:<19} {:<8} {:<16} {}",
            m.id,
            format_period(&m.period),
            m.level.name.as_deref().unwrap_or("-"),
            m.object.name.as_deref().unwrap_or("-"),
            preview(&m.text)
        )?;
    }
    Ok(())
}

/// First `TEXT_PREVIEW_LEN` characters of `text` on one line.
pub(crate) fn preview(text: &str) -> String {
    let end = text
        .char_indices()
        .nth(TEXT_PREVIEW_LEN)
        .map_or(text.len(), |(idx, _)| idx);
    text[..end].replace('\n', " ")
}
