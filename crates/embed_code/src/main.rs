// crates/embed_code/src/main.rs

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use embed_code::display::error_markdown;
use embed_code::services::{FsImageStore, StandardFetcher};
use embed_code::{render_document, AppConfig, Embedder};

fn cli() -> Command {
    Command::new("embed_code")
        .version("0.1.0")
        .about("Renders embed-<lang> and embed-jupyter blocks into markdown")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .num_args(1)
                .value_parser(clap::value_parser!(PathBuf))
                .help("TOML settings file"),
        )
        .arg(
            Arg::new("vault")
                .long("vault")
                .global(true)
                .num_args(1)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Vault root that vault:// paths resolve against (default: $EMBED_CODE_VAULT or cwd)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .global(true)
                .help("Enable debug logging on stderr")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("block")
                .about("Render a single embed block body")
                .arg(
                    Arg::new("lang")
                        .required(true)
                        .help("Block language, e.g. python, embed-python or jupyter"),
                )
                .arg(
                    Arg::new("file")
                        .default_value("-")
                        .help("File holding the block's YAML body ('-' for stdin)"),
                ),
        )
        .subcommand(
            Command::new("document")
                .about("Render every embed block of a markdown document")
                .arg(Arg::new("file").required(true).help("Markdown document"))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .num_args(1)
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Write the result here instead of stdout"),
                ),
        )
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file))
    }
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let config = AppConfig::resolve(
        matches.get_one::<PathBuf>("config").map(PathBuf::as_path),
        matches.get_one::<PathBuf>("vault").map(PathBuf::as_path),
        matches.get_flag("verbose"),
    )?;
    init_tracing(config.verbose);
    tracing::debug!(?config, "resolved configuration");

    let fetcher = StandardFetcher {
        vault_root: config.vault_root.clone(),
    };
    let store = FsImageStore {
        vault_root: config.vault_root.clone(),
    };
    let mut embedder = Embedder::new(&config.settings, &fetcher);
    if config.settings.save_images_to_attachments {
        embedder = embedder.with_image_store(&store);
    }

    match matches.subcommand() {
        Some(("block", sub)) => {
            let lang = sub
                .get_one::<String>("lang")
                .context("missing block language")?;
            let file = sub.get_one::<String>("file").map(String::as_str).unwrap_or("-");
            let yaml = read_input(file)?;
            match embedder.render(lang, &yaml) {
                Ok(rendered) => println!("{}", rendered),
                Err(err) => {
                    println!("{}", error_markdown(&err));
                    std::process::exit(1);
                }
            }
        }
        Some(("document", sub)) => {
            let file = sub
                .get_one::<String>("file")
                .context("missing document path")?;
            let markdown = read_input(file)?;
            let rendered = render_document(&markdown, &embedder);
            match sub.get_one::<PathBuf>("output") {
                Some(out) => fs::write(out, rendered)
                    .with_context(|| format!("Failed to write {}", out.display()))?,
                None => print!("{}", rendered),
            }
        }
        _ => unreachable!("subcommand_required is set"),
    }

    Ok(())
}
