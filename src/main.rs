//! CLI entry point for backdrop.

mod cli;

use std::io::IsTerminal;

use backdrop::color;
use backdrop::config::{
    initialize_default_global_config, load_config, Config, GlobalConfigInitResult,
};
use backdrop::error::StoreError;
use backdrop::logging::init_tracing;
use backdrop::render::Renderer;
use backdrop::resolve::Intent;
use backdrop::service::{BackdropService, Selection, SplashSource};
use backdrop::store::{CurrentBackground, NewRow, PersistenceStore, Row, RowFilter};
use clap::Parser;

use cli::{Command, RowsCommand};

/// `--state` value that keeps state in memory for one run.
const MEMORY_STATE: &str = ":memory:";

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    let renderer = Renderer::new(!args.no_color && std::io::stdout().is_terminal());

    // `init` must work even when the existing config no longer parses.
    if let Command::Init { force } = args.command {
        if let Err(msg) = run_init(&renderer, force) {
            renderer.error(&msg);
            std::process::exit(1);
        }
        return;
    }

    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            renderer.error(&e.to_string());
            std::process::exit(1);
        }
    };

    // Apply CLI overrides.
    if args.offline {
        config.retrieval.enabled = false;
    }
    if let Some(path) = &args.state {
        config.store.path = Some(path.clone());
    }

    init_tracing(&config.logging.filter);

    let store = match open_store(&config) {
        Ok(store) => store,
        Err(msg) if edits_state(&args.command) => {
            renderer.error(&msg);
            std::process::exit(1);
        }
        Err(msg) => {
            // Browsing still works; selections just won't outlive this run.
            tracing::warn!(error = %msg, "state unavailable, using in-memory state");
            renderer.warn(&format!("{msg}; selections will not be saved"));
            PersistenceStore::in_memory()
        }
    };
    tracing::debug!(state = %store.describe(), "opened state");
    let service = BackdropService::from_config(&config, store);

    if let Err(msg) = run_command(&renderer, &service, args.command).await {
        renderer.error(&msg);
        std::process::exit(1);
    }
}

fn open_store(config: &Config) -> Result<PersistenceStore, String> {
    if config.store.path.as_deref().map(str::trim) == Some(MEMORY_STATE) {
        return Ok(PersistenceStore::in_memory());
    }
    let path = config.store.state_path().ok_or_else(|| {
        "unable to resolve a state file path; set [store].path or BACKDROP_STATE_PATH".to_string()
    })?;
    PersistenceStore::open_file(&path)
        .map_err(|e| format!("failed to open state {}: {e}", path.display()))
}

/// Commands that operate on stored rows directly and are pointless without
/// the real state file.
fn edits_state(command: &Command) -> bool {
    matches!(command, Command::Reset | Command::Rows { .. })
}

fn run_init(renderer: &Renderer, force: bool) -> Result<(), String> {
    let result = initialize_default_global_config(force).map_err(|e| e.to_string())?;
    match result {
        GlobalConfigInitResult::Created { path } => {
            renderer.section("config created");
            renderer.field("path", &path.display().to_string());
        }
        GlobalConfigInitResult::AlreadyInitialized { path } => {
            renderer.section("config already exists");
            renderer.field("path", &path.display().to_string());
            renderer.field("hint", "use --force to overwrite (a backup is kept)");
        }
        GlobalConfigInitResult::Overwritten { path, backup_path } => {
            renderer.section("config overwritten");
            renderer.field("path", &path.display().to_string());
            renderer.field("backup", &backup_path.display().to_string());
        }
    }
    Ok(())
}

async fn run_command(
    renderer: &Renderer,
    service: &BackdropService,
    command: Command,
) -> Result<(), String> {
    match command {
        Command::Color { name, max, pick } => {
            let selection = service
                .browse_color(&name, max)
                .await
                .map_err(|e| e.to_string())?;
            let rgb = color::resolve(&selection.name);
            renderer.section(&format!("color {}", selection.name));
            renderer.swatch(&rgb.to_string(), rgb, color::contrast(rgb));
            render_selection(renderer, &selection);
            if let Some(position) = pick {
                apply_pick(renderer, service, &selection, position)?;
            }
        }
        Command::Splash { name, max, pick } => {
            let selection = service
                .browse_splash(&name, max)
                .await
                .map_err(|e| e.to_string())?;
            renderer.section(&format!("splash {}", selection.name));
            render_selection(renderer, &selection);
            if let Some(position) = pick {
                apply_pick(renderer, service, &selection, position)?;
            }
        }
        Command::Show => render_show(renderer, service).await,
        Command::Contrast { name } => {
            let rgb = color::resolve(&name);
            let foreground = color::contrast(rgb);
            renderer.section(&format!("contrast {}", name.trim()));
            renderer.field("background", &rgb.to_string());
            renderer.field("foreground", &foreground.rgb().to_string());
            renderer.field("text", foreground.label());
            if color::lookup(&name).is_none() {
                renderer.field("known", "no (neutral gray)");
            }
            renderer.swatch(name.trim(), rgb, foreground);
        }
        Command::Reset => {
            service.store().reset_all().map_err(|e| e.to_string())?;
            renderer.section("selections cleared");
        }
        Command::Rows { command } => run_rows(renderer, service, command)?,
        Command::Init { force } => run_init(renderer, force)?,
    }
    Ok(())
}

fn render_selection(renderer: &Renderer, selection: &Selection) {
    for (idx, candidate) in selection.candidates.iter().enumerate() {
        renderer.candidate(idx + 1, candidate);
    }
    if !selection.persisted {
        renderer.warn(&format!("{} `{}` was not saved", selection.intent, selection.name));
    }
}

fn apply_pick(
    renderer: &Renderer,
    service: &BackdropService,
    selection: &Selection,
    position: usize,
) -> Result<(), String> {
    let candidate = position
        .checked_sub(1)
        .and_then(|idx| selection.candidates.get(idx))
        .ok_or_else(|| {
            format!(
                "--pick {position} is out of range (1..={})",
                selection.candidates.len()
            )
        })?;
    let label = match selection.intent {
        Intent::Color => selection.name.as_str(),
        Intent::Splash => "",
    };
    if service.apply_candidate(candidate, label) {
        renderer.field("saved", &candidate.url);
        Ok(())
    } else {
        Err(format!("failed to save {}", candidate.url))
    }
}

async fn render_show(renderer: &Renderer, service: &BackdropService) {
    renderer.section("background");
    match service.startup_display() {
        CurrentBackground::Empty => renderer.field("display", "none"),
        CurrentBackground::ColorOnly(name) => {
            let rgb = color::resolve(&name);
            renderer.field("color", &name);
            renderer.swatch(&name, rgb, color::contrast(rgb));
        }
        CurrentBackground::ImageBackground { url, color_label } => {
            renderer.field("image", &url);
            if !color_label.is_empty() {
                let rgb = color::resolve(&color_label);
                renderer.field("color", &color_label);
                renderer.swatch(&color_label, rgb, color::contrast(rgb));
            }
        }
    }

    if let Some(option) = service.startup_color_option() {
        renderer.field("preset", &option.color_name);
    }

    let splash = service.startup_splash().await;
    renderer.section("splash");
    renderer.field("image", &splash.url);
    let source = match &splash.source {
        SplashSource::SavedImage => "saved image".to_string(),
        SplashSource::CatalogImage(name) => format!("catalog {name}"),
        SplashSource::SavedTheme(theme) => format!("theme {theme}"),
        SplashSource::DefaultTheme(theme) => format!("default theme {theme}"),
    };
    renderer.field("source", &source);
    renderer.field("search", service.engine().source_name());
}

fn run_rows(
    renderer: &Renderer,
    service: &BackdropService,
    command: RowsCommand,
) -> Result<(), String> {
    let store = service.store();
    match command {
        RowsCommand::List { table, active } => {
            let filter = if active {
                RowFilter::ActiveOnly
            } else {
                RowFilter::All
            };
            for row in store.list_rows(table, filter) {
                renderer.row(&row);
            }
        }
        RowsCommand::AddColor { name } => {
            let row = store
                .insert_row(NewRow::Color {
                    color_name: name,
                    is_active: true,
                })
                .map_err(|e| e.to_string())?;
            renderer.row(&row);
        }
        RowsCommand::AddSplash { name, url } => {
            let row = store
                .insert_row(NewRow::Splash {
                    splash_name: name,
                    image_url: url,
                    is_active: true,
                })
                .map_err(|e| e.to_string())?;
            renderer.row(&row);
        }
        RowsCommand::SetActive { table, id, active } => {
            let mut row = store
                .list_rows(table, RowFilter::All)
                .into_iter()
                .find(|row| row.id() == id)
                .ok_or_else(|| {
                    StoreError::RowNotFound {
                        table: table.name(),
                        id,
                    }
                    .to_string()
                })?;
            match &mut row {
                Row::Color(color) => color.is_active = active,
                Row::Splash(splash) => splash.is_active = active,
                Row::Background(background) => background.is_current = active,
            }
            store.update_row(row.clone()).map_err(|e| e.to_string())?;
            renderer.row(&row);
        }
        RowsCommand::Delete { table, id } => {
            store.delete_row(table, id).map_err(|e| e.to_string())?;
            renderer.field("deleted", &format!("{table} {id}"));
        }
    }
    Ok(())
}
