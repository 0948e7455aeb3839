use crate::cli::{Cli, Commands, SettingsCommands};
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::info;

use crate::Config;
use crate::app::status::render_settings;
use crate::client::HttpTransport;
use crate::context::{FileContextSource, SessionContext};
use crate::render::{render, render_document};
use crate::request::HttpMethod;
use crate::settings::{FileSettingsStore, SettingsStore, WidgetSettings};
use crate::ui::style as ui;
use crate::view::{DisplayInstructions, ViewState};
use crate::widget::Widget;

/// Apply CLI field edits on top of persisted settings.
///
/// Returns `true` when anything changed. Methods are normalised to upper case.
fn apply_edits(
    settings: &mut WidgetSettings,
    url: Option<String>,
    method: Option<String>,
    api_key: Option<String>,
) -> Result<bool> {
    let mut changed = false;
    if let Some(url) = url {
        settings.endpoint = url;
        changed = true;
    }
    if let Some(method) = method {
        let parsed = HttpMethod::from_str(method.trim())
            .map_err(|_| anyhow::anyhow!("unsupported HTTP method: {method}"))?;
        settings.method = parsed.to_string();
        changed = true;
    }
    if let Some(api_key) = api_key {
        settings.credential = api_key;
        changed = true;
    }
    Ok(changed)
}

async fn write_page(path: &Path, markup: &str, title: &str) -> Result<()> {
    tokio::fs::write(path, render_document(markup, title))
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Paint display instructions to the terminal (or an HTML page).
///
/// An error banner becomes the command's error; `main` prints it.
async fn paint(display: &DisplayInstructions, html: Option<&Path>, title: &str) -> Result<()> {
    if let Some(message) = &display.error {
        bail!("{message}");
    }

    if let Some(markup) = &display.content {
        match html {
            Some(path) => {
                write_page(path, markup, title).await?;
                eprintln!("{} {}", ui::success("✓ wrote"), ui::value(path.display()));
            }
            None => println!("{markup}"),
        }
    }
    Ok(())
}

async fn run_fetch(
    config: &Config,
    edits: (Option<String>, Option<String>, Option<String>),
    conversation: Option<PathBuf>,
    contact: Option<PathBuf>,
    html: Option<PathBuf>,
) -> Result<()> {
    let store: Arc<dyn SettingsStore> = Arc::new(FileSettingsStore::open(&config.settings_path)?);

    let source = FileContextSource::new(conversation, contact);
    let session = SessionContext::load(&source).await?;

    let widget = Widget::new(HttpTransport::new(&config.http), store, session);

    let mut settings = widget.settings()?;
    let (url, method, api_key) = edits;
    if apply_edits(&mut settings, url, method, api_key)? {
        widget.update_settings(&settings)?;
    }

    let loading = ViewState::Loading.display();
    eprintln!("{}", ui::dim(loading.trigger_label));

    let display = widget.trigger().await?;
    let title = format!("{} {}", settings.method, settings.endpoint.trim());
    paint(&display, html.as_deref(), &title).await
}

async fn run_render(file: Option<PathBuf>, indent: usize, html: Option<PathBuf>) -> Result<()> {
    let (raw, title) = match file {
        Some(path) => {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            (raw, path.display().to_string())
        }
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("Failed to read stdin")?;
            (raw, "stdin".to_string())
        }
    };

    let value: serde_json::Value = serde_json::from_str(&raw).context("Input is not valid JSON")?;
    let display = ViewState::Success(render(&value, indent)).display();
    paint(&display, html.as_deref(), &title).await
}

fn run_settings(config: &Config, command: SettingsCommands) -> Result<()> {
    let store = FileSettingsStore::open(&config.settings_path)?;
    let mut settings = WidgetSettings::load(&store)?;

    match command {
        SettingsCommands::Show => {}
        SettingsCommands::Set {
            url,
            method,
            api_key,
        } => {
            if apply_edits(&mut settings, url, method, api_key)? {
                settings.save(&store)?;
                info!(path = %store.path().display(), "settings updated");
            }
        }
    }

    println!("{}", render_settings(&settings, store.path()));
    Ok(())
}

/// Run one subcommand. Only `fetch` and `settings` load (or create) the config.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Fetch {
            url,
            method,
            api_key,
            conversation,
            contact,
            html,
        } => {
            let config = Config::load_or_init()?;
            run_fetch(&config, (url, method, api_key), conversation, contact, html).await
        }
        Commands::Render { file, indent, html } => run_render(file, indent, html).await,
        Commands::Settings { settings_command } => {
            let config = Config::load_or_init()?;
            run_settings(&config, settings_command)
        }
    }
}
