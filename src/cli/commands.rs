use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use quant_solver::api::client::HttpClient;
use quant_solver::api::openai_compat::OpenAiCompatGenerator;
use quant_solver::api::GenerationError;
use quant_solver::config::settings::{Settings, DEFAULT_MODEL};
use quant_solver::session::export::write_export;
use quant_solver::session::{ChatSession, Message, Transcript};
use quant_solver::solver::SolutionGenerator;
use quant_solver::utils::format;

use crate::cli::args::{IoArgs, RuntimeArgs};

/// Explicit `--config` wins, then `./.quant_solver.toml`, then the user config.
pub fn load_settings(runtime: &RuntimeArgs) -> Result<Settings> {
    let explicit = runtime.config.as_deref().map(Path::new);
    let cwd = std::env::current_dir()?;
    let project_root = Settings::project_root(&cwd);
    Settings::load_with(project_root, explicit)
}

fn build_session(settings: &Settings, runtime: &RuntimeArgs) -> Result<ChatSession> {
    let provider = match runtime.provider.as_deref() {
        Some(p) => quant_solver::api::providers::Provider::parse(p)?,
        None => settings.provider()?,
    };
    let model = runtime
        .model
        .as_deref()
        .or(settings.model.as_deref())
        .unwrap_or(DEFAULT_MODEL);
    let language = runtime.language.as_deref().unwrap_or(&settings.language);

    let api_key = settings.resolve_api_key(provider);
    if api_key.is_none() && provider.requires_api_key() {
        let var = provider.api_key_env().unwrap_or_default();
        return Err(anyhow!(
            "API key is not set. Use `config set api-key ...` or set env {}",
            var
        ));
    }

    let http = HttpClient::new(settings.timeout())?;
    let model_client = OpenAiCompatGenerator::new(
        http.client,
        provider,
        settings.base_url.as_deref(),
        api_key.as_deref(),
        model,
    )?;
    tracing::info!(%provider, model, endpoint = model_client.endpoint(), language, "session ready");

    let generator = SolutionGenerator::new(Arc::new(model_client), language);
    Ok(ChatSession::new(Transcript::new(), generator))
}

async fn submit_with_spinner<'a>(session: &'a mut ChatSession, text: &str) -> Result<&'a Message, GenerationError> {
    let pb = ProgressBar::new_spinner().with_message("Generating solution...");
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    let result = session.submit(text).await;
    pb.finish_and_clear();
    result
}

fn export_to(session: &ChatSession, path: &str) -> Result<()> {
    write_export(session.transcript(), &PathBuf::from(path))?;
    println!("{}", format::success(&format!("Chat history exported to {}", path)));
    Ok(())
}

pub async fn handle_solve(settings: &Settings, prompt: Option<String>, runtime: &RuntimeArgs, io: &IoArgs) -> Result<()> {
    // Prefer file input if provided
    let prompt = match (&io.input_file, &prompt) {
        (Some(path), _) => quant_solver::utils::io::read_to_string(path)?.trim().to_string(),
        (None, Some(p)) if !p.trim().is_empty() => p.to_string(),
        _ => return Err(anyhow!("Problem description is empty. Provide text, --file, or use interactive mode.")),
    };

    let mut session = build_session(settings, runtime)?;
    let solution = submit_with_spinner(&mut session, &prompt)
        .await
        .map_err(|e| anyhow!("Error generating solution: {}", e))?
        .content()
        .to_string();

    println!("{}", solution);
    if let Some(out) = &io.output_file {
        quant_solver::utils::io::write_string(out, &solution)?;
    }
    if let Some(path) = &io.export_file {
        export_to(&session, path)?;
    }
    Ok(())
}

const INTERACTIVE_HELP: &str = "\
/history          show the conversation so far
/stats            lines and characters of the latest solution
/export [path]    save the conversation as JSON
/help             this text
/quit             leave";

pub async fn handle_interactive(settings: &Settings, runtime: &RuntimeArgs) -> Result<()> {
    use dialoguer::Input;

    let mut session = build_session(settings, runtime)?;
    println!("{}", style("Paste a programming problem. /help for commands, Ctrl+C to exit.").cyan());
    loop {
        let line: String = Input::new().with_prompt("You").allow_empty(true).interact_text()?;
        let line = line.trim();
        if line.is_empty() { continue; }

        if let Some(cmd) = line.strip_prefix('/') {
            let mut parts = cmd.splitn(2, char::is_whitespace);
            match (parts.next().unwrap_or(""), parts.next().map(str::trim)) {
                ("quit" | "exit", _) => break,
                ("help", _) => println!("{}", INTERACTIVE_HELP),
                ("history", _) => {
                    if session.transcript().is_empty() {
                        println!("{}", format::warn("No messages yet."));
                    }
                    for msg in session.transcript().all() {
                        println!("{}\n", format::message(msg));
                    }
                }
                ("stats", _) => match session.stats() {
                    Some(stats) => println!("{}", format::stats(&stats)),
                    None => println!("{}", format::warn("No solution yet.")),
                },
                ("export", path) => {
                    let path = path.filter(|p| !p.is_empty()).unwrap_or(&settings.export_file);
                    if let Err(e) = export_to(&session, path) {
                        println!("{}", format::error(&format!("{:#}", e)));
                    }
                }
                (other, _) => println!("{}", format::warn(&format!("Unknown command /{}", other))),
            }
            continue;
        }

        match submit_with_spinner(&mut session, line).await {
            Ok(msg) => println!("{}", format::message(msg)),
            Err(e) => {
                tracing::error!(error = %e, "generation failed");
                println!("{}", format::error(&format!("Error generating solution: {}", e)));
            }
        }
    }
    Ok(())
}

pub fn handle_config_init(force: bool, scope: Option<&str>) -> Result<()> {
    let path = if scope == Some("project") {
        let cwd = std::env::current_dir()?;
        Settings::init_scoped(force, Some(&cwd))?
    } else {
        Settings::init_scoped(force, None)?
    };
    println!("{}", format::success(&format!("Wrote default config to {}", path.display())));
    Ok(())
}

pub fn handle_config_list(settings: &Settings) -> Result<()> {
    println!("Provider: {}", settings.provider);
    println!("Model: {}", settings.model.as_deref().unwrap_or(DEFAULT_MODEL));
    println!("Base URL: {}", settings.base_url.as_deref().unwrap_or("(provider default)"));
    println!("Language: {}", settings.language);
    match settings.timeout_secs {
        Some(secs) => println!("Timeout: {}s", secs),
        None => println!("Timeout: none"),
    }
    println!("Export file: {}", settings.export_file);
    println!("API key set: {}", settings.api_key.is_some());
    Ok(())
}

pub fn handle_config_set(settings: &mut Settings, runtime: &RuntimeArgs, key: &str, value: &str) -> Result<()> {
    settings.set(key, value)?;
    let explicit = runtime.config.as_deref().map(Path::new);
    let cwd = std::env::current_dir()?;
    let project_root = Settings::project_root(&cwd);
    let path = settings.save_with(project_root, explicit)?;
    println!("{}", format::success(&format!("Updated {} in {}", key, path.display())));
    Ok(())
}
