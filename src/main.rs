//! packlane CLI.
//!
//! Entry point for the `packlane` command-line tool.

use clap::{Parser, Subcommand};
use packlane::{
    generate, BuildConfig, ConfigError, EffectiveSettings, Environment, RuntimeContext,
    SettingsFile,
};
use serde_json::json;
use std::path::PathBuf;
use std::process;

const DEFAULT_SETTINGS_FILE: &str = "packlane.toml";

#[derive(Parser)]
#[command(name = "packlane")]
#[command(about = "Configuration generator for JavaScript bundler builds", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the bundler configuration
    Generate {
        /// Path to settings file (default: packlane.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Build environment: dev or production
        #[arg(long, default_value = "dev")]
        env: String,

        /// Project root containing package.json (default: current directory)
        #[arg(long)]
        project_root: Option<PathBuf>,

        /// Override the output path from the command line
        #[arg(long)]
        output_path: Option<String>,

        /// Pretty-print the generated JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Verify the settings file
    Verify {
        /// Path to settings file (default: packlane.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },

    /// Show the effective settings with provenance
    Explain {
        /// Path to settings file (default: packlane.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Override the output path from the command line
        #[arg(long)]
        output_path: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            env,
            project_root,
            output_path,
            pretty,
        } => {
            run_generate(config, &env, project_root, output_path, pretty);
        }
        Commands::Verify { config } => {
            run_verify(config);
        }
        Commands::Explain {
            config,
            output_path,
            json,
        } => {
            run_explain(config, output_path, json);
        }
    }
}

fn run_generate(
    config: Option<PathBuf>,
    env: &str,
    project_root: Option<PathBuf>,
    output_path: Option<String>,
    pretty: bool,
) {
    let environment = match Environment::parse(env) {
        Some(e) => e,
        None => {
            eprintln!("Unknown environment: {} (expected dev or production)", env);
            process::exit(1);
        }
    };

    let effective = match load_effective(config, output_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Settings error: {}", e);
            process::exit(1);
        }
    };
    let settings = match effective.to_build_settings() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Settings error: {}", e);
            process::exit(1);
        }
    };

    let root = project_root.unwrap_or_else(|| PathBuf::from("."));
    let ctx = RuntimeContext::new(root, environment);
    let build = BuildConfig::from_settings(settings);

    let bundler_config = match generate(&ctx, &build) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Generation error: {}", e);
            process::exit(1);
        }
    };

    let rendered = if pretty {
        serde_json::to_string_pretty(&bundler_config)
    } else {
        serde_json::to_string(&bundler_config)
    };
    match rendered {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn run_verify(config: Option<PathBuf>) {
    let path = config.unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));

    match SettingsFile::from_file(&path) {
        Ok(file) => {
            println!("Settings valid: {}", path.display());
            println!();
            if let Some(ref output_path) = file.output_path {
                println!("  Output path: {}", output_path);
            }
            if let Some(ref public_path) = file.public_path {
                println!("  Public path: {}", public_path);
            }
            if let Some(ref lint) = file.lint {
                if lint.enabled == Some(true) {
                    println!("  Lint: enabled");
                }
                if lint.lint_vue == Some(true) {
                    println!("  Lint .vue files: yes");
                }
            }
            if let Some(ref clean) = file.clean {
                if clean.enabled == Some(true) {
                    println!("  Clean output before build: yes");
                }
                if let Some(ref patterns) = clean.patterns {
                    println!("  Clean patterns: {}", patterns.join(", "));
                }
            }
        }
        Err(e) => {
            eprintln!("Settings error: {}", e);
            process::exit(1);
        }
    }
}

fn run_explain(config: Option<PathBuf>, output_path: Option<String>, json_output: bool) {
    let effective = match load_effective(config, output_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Settings error: {}", e);
            process::exit(1);
        }
    };

    if json_output {
        match serde_json::to_string_pretty(&effective) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    println!("Effective settings {}", effective.generation_id);
    println!("  Created: {}", effective.created_at);
    println!("  Digest:  {}", effective.settings_digest);
    println!("  Sources:");
    for source in &effective.sources {
        match (&source.path, &source.digest) {
            (Some(path), Some(digest)) => {
                println!("    {} {} ({})", source.origin.as_str(), path, &digest[..12]);
            }
            _ => println!("    {}", source.origin.as_str()),
        }
    }
    println!();
    match serde_json::to_string_pretty(&effective.settings) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn load_effective(
    config: Option<PathBuf>,
    output_path: Option<String>,
) -> Result<EffectiveSettings, ConfigError> {
    let path = config.unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));
    let cli_overrides = output_path.map(|p| json!({ "output_path": p }));
    EffectiveSettings::build(Some(&path), cli_overrides)
}
