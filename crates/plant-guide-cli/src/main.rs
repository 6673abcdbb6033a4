use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;

use plant_guide_core::identify::NO_PLANT_DETECTED;
use plant_guide_core::{
    guide_prompt, parse_response, resolve_base_dir, Categorizer, Config, Digest, GeminiResponse,
    OutputFormat, PlantGuideError, PlantIdResponse, PlantIdentity, PlantNetResponse, Result,
};

mod args;
mod logging;
mod render;

use args::{Cli, Commands, ConfigAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose, cli.quiet);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let base_dir = resolve_base_dir(cli.base_dir);

    let result = match cli.command {
        Some(Commands::Format { file, json }) => handle_format(&base_dir, file.as_deref(), json),
        Some(Commands::Identify {
            plant_id,
            plantnet,
            gemini,
            json,
        }) => handle_identify(
            &base_dir,
            &plant_id,
            plantnet.as_deref(),
            gemini.as_deref(),
            json,
        ),
        Some(Commands::Prompt { plant_id, plantnet }) => {
            handle_prompt(&plant_id, plantnet.as_deref())
        }
        Some(Commands::Categories) => handle_categories(&base_dir),
        Some(Commands::Config { action }) => handle_config(action, &base_dir),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "plant-guide", &mut io::stdout());
}

/// Load config and build a categorizer with the configured keywords
fn load_categorizer(base_dir: &Path) -> Result<(Config, Categorizer)> {
    let config = Config::load(base_dir)?;
    if !config.output.color {
        colored::control::set_override(false);
    }
    let categorizer = Categorizer::new(config.category_store()?);
    Ok((config, categorizer))
}

/// Read a file, or stdin for `None` / `-`
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            if !p.exists() {
                return Err(PlantGuideError::InputNotFound {
                    path: p.to_path_buf(),
                });
            }
            Ok(fs::read_to_string(p)?)
        }
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn handle_format(base_dir: &Path, file: Option<&Path>, json: bool) -> Result<()> {
    let (config, categorizer) = load_categorizer(base_dir)?;
    let text = read_input(file)?;

    let guide = categorizer.categorize(Some(&text));
    tracing::info!(sections = guide.sections().len(), "formatted guide");

    if json || config.output.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&guide)?);
    } else {
        print!("{}", render::render_guide(&guide));
    }
    Ok(())
}

fn plant_id_digest(path: &Path) -> Result<Option<Digest>> {
    let response: PlantIdResponse = parse_response("Plant.id", &read_input(Some(path))?)?;
    Ok(response.digest())
}

fn plant_net_digest(path: Option<&Path>) -> Result<Option<Digest>> {
    match path {
        Some(path) => Ok(PlantNetResponse::digest_from_json(&read_input(Some(path))?)),
        None => Ok(None),
    }
}

fn info_of(digest: Option<&Digest>) -> &str {
    digest.map(|d| d.info.as_str()).unwrap_or_default()
}

fn handle_prompt(plant_id: &Path, plantnet: Option<&Path>) -> Result<()> {
    let pid = plant_id_digest(plant_id)?;
    let pn = plant_net_digest(plantnet)?;
    println!("{}", guide_prompt(info_of(pid.as_ref()), info_of(pn.as_ref())));
    Ok(())
}

fn handle_identify(
    base_dir: &Path,
    plant_id: &Path,
    plantnet: Option<&Path>,
    gemini: Option<&Path>,
    json: bool,
) -> Result<()> {
    let (config, categorizer) = load_categorizer(base_dir)?;
    let json = json || config.output.format == OutputFormat::Json;

    let pid = plant_id_digest(plant_id)?;
    let pn = plant_net_digest(plantnet)?;

    let Some(identity) = PlantIdentity::combine(pid.as_ref(), pn.as_ref()) else {
        if json {
            println!("{}", serde_json::json!({ "identified": false }));
        } else {
            println!("{}", NO_PLANT_DETECTED.yellow());
        }
        return Ok(());
    };
    tracing::info!(plant = %identity, "identified plant");

    let guide = match gemini {
        Some(path) => {
            let response: GeminiResponse = parse_response("Gemini", &read_input(Some(path))?)?;
            Some(categorizer.categorize(response.guide_text()))
        }
        None => None,
    };

    if json {
        let mut out = serde_json::json!({
            "identified": true,
            "name": identity,
            "display_name": identity.to_string(),
        });
        match &guide {
            Some(guide) => out["guide"] = serde_json::to_value(guide)?,
            None => {
                out["prompt"] = serde_json::Value::String(guide_prompt(
                    info_of(pid.as_ref()),
                    info_of(pn.as_ref()),
                ))
            }
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("{} {}", "Name:".green().bold(), identity.scientific.bold());
    if !identity.common.is_empty() {
        println!("      {}", identity.common.yellow());
    }
    println!();

    match guide {
        Some(guide) => print!("{}", render::render_guide(&guide)),
        None => {
            println!("{}", "Guide prompt:".cyan().bold());
            println!(
                "{}",
                guide_prompt(info_of(pid.as_ref()), info_of(pn.as_ref()))
            );
        }
    }
    Ok(())
}

fn handle_categories(base_dir: &Path) -> Result<()> {
    let (_, categorizer) = load_categorizer(base_dir)?;
    println!();
    for cat in categorizer.store().all() {
        println!("{}", render::render_category(cat));
    }
    println!();
    Ok(())
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(base_dir)?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    return Err(PlantGuideError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(base_dir)?;
            config.set(&key, &value)?;
            config.save(base_dir)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path: PathBuf = Config::path(base_dir);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}
