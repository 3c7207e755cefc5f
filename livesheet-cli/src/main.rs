//! Livesheet CLI - run the stylesheet load pass outside a browser
//!
//! Usage:
//!   livesheet load --link URL... --style FILE...   Load sheets as the editor would
//!   livesheet rewrite FILE --source-url URL        Rewrite a sheet's references
//!   livesheet unminify FILE                        Pretty print a one-line sheet
//!
//! Set `RUST_LOG=debug` to follow the load as it happens.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use livesheet_css::{rewrite, unminify};
use livesheet_dom::{DomTree, ElementData};
use livesheet_editor::{EditorConfig, LoadedSheets, NetFetcher, StylesheetLoader};
use owo_colors::OwoColorize;

/// Livesheet - load, rewrite and reformat stylesheets the way the live editor does
#[derive(Parser, Debug)]
#[command(name = "livesheet")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Load two linked sheets and an inline one against a base URL
    livesheet load --base https://example.com/ --link css/site.css --link /print.css --style theme.css

    # Same, as JSON
    livesheet load --json --link https://example.com/site.css

    # Anchor a downloaded sheet's relative references to where it came from
    livesheet rewrite site.css --source-url https://example.com/css/site.css
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load stylesheets into editable entries and print them
    Load {
        /// Stylesheet link to fetch (URL, file path or data: URL)
        #[arg(long = "link", value_name = "HREF")]
        links: Vec<String>,

        /// Local file to include as an inline <style>
        #[arg(long = "style", value_name = "FILE")]
        styles: Vec<PathBuf>,

        /// Base URL relative links resolve against
        #[arg(long, value_name = "URL")]
        base: Option<String>,

        /// JSON configuration file (LIVESHEET_* variables apply otherwise)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Pretty print single-line sheets
        #[arg(long)]
        unminify: bool,

        /// Output entries as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Rewrite @import and url() references against a sheet's URL
    Rewrite {
        /// Stylesheet file
        file: PathBuf,

        /// URL the sheet was fetched from
        #[arg(long, value_name = "URL")]
        source_url: String,
    },

    /// Pretty print a minified stylesheet
    Unminify {
        /// Stylesheet file
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Load {
            links,
            styles,
            base,
            config,
            unminify,
            json,
        } => {
            let mut config = match config {
                Some(path) => EditorConfig::from_json_file(&path)?,
                None => EditorConfig::from_env(),
            };
            if base.is_some() {
                config.base_url = base;
            }
            config.unminify |= unminify;
            load(&config, &links, &styles, json)
        }
        Command::Rewrite { file, source_url } => {
            print!("{}", rewrite(&read(&file)?, &source_url));
            Ok(())
        }
        Command::Unminify { file } => {
            println!("{}", unminify(&read(&file)?));
            Ok(())
        }
    }
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading '{}'", path.display()))
}

/// Build a page from the given links and styles, then run the load pass on it.
fn load(config: &EditorConfig, links: &[String], styles: &[PathBuf], json: bool) -> anyhow::Result<()> {
    let mut dom = DomTree::with_skeleton();
    let head = dom.head().context("page has no head")?;

    for href in links {
        let link = dom.create_element(
            ElementData::new("link")
                .with_attr("rel", "stylesheet")
                .with_attr("href", href),
        );
        dom.append_child(head, link);
    }
    for path in styles {
        let title = path.file_name().map(|name| name.to_string_lossy());
        let mut data = ElementData::new("style");
        if let Some(title) = &title {
            data = data.with_attr("title", title);
        }
        let style = dom.create_element(data);
        dom.set_text_content(style, &read(path)?);
        dom.append_child(head, style);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let fetcher = NetFetcher::new()?;
    log::debug!(
        "loading {} link(s) and {} inline sheet(s), base {:?}",
        links.len(),
        styles.len(),
        config.base_url
    );
    let loaded = runtime.block_on(StylesheetLoader::new(config).load(&mut dom, &fetcher));
    log::debug!("load finished with {} entries", loaded.entries.len());

    if json {
        print_json(&dom, &loaded)?;
    } else {
        print_entries(config, &dom, &loaded);
    }
    Ok(())
}

fn print_entries(config: &EditorConfig, dom: &DomTree, loaded: &LoadedSheets) {
    for entry in &loaded.entries {
        let marker = if entry.name == loaded.initial { "*" } else { " " };
        print!("{marker} {} {}", entry.name.bold().cyan(), entry.origin.dimmed());
        if let Some(url) = entry.source_url() {
            print!(" {}", url.dimmed());
        }
        if let Some(media) = entry.media() {
            print!(" {}", format!("media={media}").yellow());
        }
        println!();

        let content = entry.content(dom);
        let content = if config.unminify {
            unminify(&content)
        } else {
            content.as_str().into()
        };
        for line in content.lines() {
            println!("    {line}");
        }
        println!();
    }
}

fn print_json(dom: &DomTree, loaded: &LoadedSheets) -> anyhow::Result<()> {
    let entries: Vec<_> = loaded
        .entries
        .iter()
        .map(|entry| {
            serde_json::json!({
                "name": entry.name,
                "origin": entry.origin.to_string(),
                "source_url": entry.source_url(),
                "media": entry.media(),
                "content": entry.content(dom),
            })
        })
        .collect();
    let output = serde_json::json!({
        "initial": loaded.initial,
        "entries": entries,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
