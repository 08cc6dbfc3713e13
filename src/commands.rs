use crate::{emit_success, OutputMode, SavedAction, SavedSearchArgs};
use codescout::config::{self, CodescoutConfig};
use codescout::ui::{self, Icons, Spinner};
use codescout::{NewSavedQuery, Repository, SavedQuery, SavedSearchStore};
use owo_colors::OwoColorize;
use std::path::Path;

impl From<SavedSearchArgs> for NewSavedQuery {
    fn from(args: SavedSearchArgs) -> Self {
        NewSavedQuery {
            description: args.description,
            query: args.query,
            notify: args.notify,
            notify_slack: args.notify_slack,
            owner_kind: args.owner_kind,
            user_id: args.user_id,
            org_id: args.org_id,
        }
    }
}

pub fn run_version(output_mode: OutputMode) -> anyhow::Result<()> {
    if output_mode.is_human() {
        ui::block(format_args!("codescout {}", env!("CARGO_PKG_VERSION").bold()));
    } else {
        let data = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
        });
        emit_success(output_mode, "version", data)?;
    }
    Ok(())
}

pub fn run_init(path: &Path, force: bool, output_mode: OutputMode) -> anyhow::Result<()> {
    let config = CodescoutConfig {
        database: Some(".codescout/codescout.db".to_string()),
        default_first: Some(30),
    };
    config::write_config(path, &config, force)?;

    if output_mode.is_human() {
        ui::success(&format!("Wrote {}", path.display()));
    } else {
        emit_success(output_mode, "init", serde_json::json!({ "config": path }))?;
    }
    Ok(())
}

fn open_store(database: &Path) -> anyhow::Result<SavedSearchStore> {
    config::ensure_db_dir(database)?;
    Ok(SavedSearchStore::open(database)?)
}

pub fn run_saved(action: SavedAction, database: &Path, output_mode: OutputMode) -> anyhow::Result<()> {
    let store = open_store(database)?;

    match action {
        SavedAction::List => {
            let saved = store.list_all()?;
            if output_mode.is_human() {
                ui::header(&format!("Saved searches ({})", saved.len()));
                ui::info(&format!("{} database", Icons::DATABASE), &database.display().to_string());
                if saved.is_empty() {
                    ui::empty("No saved searches.");
                } else {
                    ui::block(ui::saved_searches_table(&saved));
                }
            } else {
                emit_success(output_mode, "saved.list", serde_json::to_value(&saved)?)?;
            }
        }

        SavedAction::Show { id } => {
            let saved = store
                .get(id)?
                .ok_or(codescout::Error::NotFound(id))?;
            if output_mode.is_human() {
                print_saved(&saved);
            } else {
                emit_success(output_mode, "saved.show", serde_json::to_value(&saved)?)?;
            }
        }

        SavedAction::Create(args) => {
            let saved = store.create(&args.into())?;
            if output_mode.is_human() {
                ui::success(&format!("{} Created saved search {}", Icons::NEW, saved.id));
                print_saved(&saved);
            } else {
                emit_success(output_mode, "saved.create", serde_json::to_value(&saved)?)?;
            }
        }

        SavedAction::Update { id, fields } => {
            let saved = store.update(id, &fields.into())?;
            if output_mode.is_human() {
                ui::success(&format!("{} Updated saved search {}", Icons::MOD, saved.id));
                print_saved(&saved);
            } else {
                emit_success(output_mode, "saved.update", serde_json::to_value(&saved)?)?;
            }
        }

        SavedAction::Delete { id } => {
            store.delete(id)?;
            if output_mode.is_human() {
                ui::success(&format!("{} Deleted saved search {}", Icons::DEL, id));
            } else {
                emit_success(output_mode, "saved.delete", serde_json::json!({ "id": id }))?;
            }
        }
    }

    Ok(())
}

fn print_saved(saved: &SavedQuery) {
    ui::section(&format!("Saved search {}", saved.id));
    ui::summary_row("description:", &saved.description);
    ui::summary_row("query:      ", &saved.query);
    ui::summary_row("owner:      ", &format!("{} {}", Icons::owner(saved.owner.kind()), saved.owner));
    ui::summary_row(
        "notify:     ",
        &format!(
            "{} owner={} slack={}",
            Icons::BELL,
            saved.notify,
            saved.notify_slack
        ),
    );
    ui::summary_row("updated:    ", &ui::dim(&saved.updated_at));
}

pub fn run_contributors(
    repo_path: &Path,
    range: Option<String>,
    first: Option<usize>,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let repo = Repository::open(repo_path)?;
    let connection = repo.contributors(range, first);

    let spinner = Spinner::new(&format!("{} Reading history of {}", Icons::SEARCH, repo.name()));
    let total = connection.total_count();
    spinner.finish_and_clear();
    let total = total?;
    let items = connection.items()?;
    let page_info = connection.page_info()?;

    if output_mode.is_human() {
        ui::header(&format!("Contributors of {}", repo.name()));
        if let Some(range) = connection.range() {
            ui::info("range", range);
        }
        if items.is_empty() {
            ui::empty("No commits in range.");
        } else {
            ui::block(ui::contributors_table(items));
        }
        let shown = if page_info.has_next_page {
            format!("{} of {} (more available, raise --first)", items.len(), total)
        } else {
            format!("{} of {}", items.len(), total)
        };
        ui::summary_row(&format!("{} shown:", Icons::STATS), &shown);
    } else {
        let data = serde_json::json!({
            "repository": repo.name(),
            "range": connection.range(),
            "total_count": total,
            "page_info": page_info,
            "nodes": items,
        });
        emit_success(output_mode, "contributors", data)?;
    }

    Ok(())
}
