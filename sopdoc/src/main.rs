//! sopdoc - SOP content engine CLI
//!
//! A terminal front end over the content engine: list tabs, render and
//! search documents, seed the workspace store and tick checklists.

#![deny(unsafe_code)]

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Commands, ShowFormat};
use sopdoc::content_model::Document;
use sopdoc::controller::SyncController;
use sopdoc::progress::{ChecklistProgress, FileKv};
use sopdoc::render::{self, ViewState};
use sopdoc::search;
use sopdoc::store::{JsonFileStore, StaticStore};
use std::path::Path;

/// Main entry point for the sopdoc CLI application
fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    let bundled = StaticStore::bundled().context("bundled dataset is malformed")?;
    let store = JsonFileStore::new(&cli.store);
    let mut controller = SyncController::open(bundled, store);

    match cli.command {
        Commands::Tabs => {
            for tab in controller.tabs() {
                let icon = if tab.icon.is_empty() {
                    render::icon_for_label(&tab.label)
                } else {
                    tab.icon.as_str()
                };
                println!("{:<16} {:<14} {}", tab.id, format!("[{}]", icon), tab.label);
            }
        }

        Commands::Show {
            tab,
            expand_all,
            format,
            output,
        } => {
            let doc = fetch_document(&mut controller, &tab)?;
            let mut view = ViewState::new();
            view.activate_document(&doc);
            if expand_all {
                view.expand_all(&doc);
            }

            let mut progress = open_progress(&cli.store);
            let rendered = match format {
                ShowFormat::Text => render::to_text(&doc, &view, progress.get()),
                ShowFormat::Html => render::to_html(&doc, &view, progress.get()),
            };

            match output {
                Some(path) => std::fs::write(&path, rendered)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => print!("{}", rendered),
            }
        }

        Commands::Search { query } => {
            controller
                .load_all_documents()
                .context("loading documents for search")?;
            let results = search::search(&query, controller.loaded_documents());
            if results.is_empty() {
                println!("No matches for '{}'", query);
            }
            for result in results {
                println!(
                    "{}#{}  {}  \"{}\"",
                    result.tab_id, result.section_id, result.section_title, result.matched_text
                );
            }
        }

        Commands::Init { force } => {
            if controller.is_initialized() {
                if !force {
                    bail!(
                        "store at '{}' is already initialized (use --force to reseed)",
                        cli.store.display()
                    );
                }
                wipe_store(&cli.store)?;
                let bundled = StaticStore::bundled().context("bundled dataset is malformed")?;
                controller = SyncController::open(bundled, JsonFileStore::new(&cli.store));
            }
            controller.initialize().context("seeding the store")?;
            println!(
                "Seeded store at '{}' with {} tabs",
                cli.store.display(),
                controller.tabs().len()
            );
        }

        Commands::Check { item_id } => {
            // Items authored as checked-by-default toggle from that state,
            // not from false
            controller
                .load_all_documents()
                .context("loading documents")?;
            let default_checked = controller
                .loaded_documents()
                .iter()
                .find_map(|doc| doc.checklist_default(&item_id))
                .unwrap_or(false);

            let mut progress = open_progress(&cli.store);
            progress.toggle(&item_id, default_checked);
            let state = if progress.is_checked(&item_id, default_checked) {
                "checked"
            } else {
                "unchecked"
            };
            println!("{} is now {}", item_id, state);
        }

        Commands::Export { tab, output } => {
            let doc = fetch_document(&mut controller, &tab)?;
            let mut view = ViewState::new();
            view.activate_document(&doc);
            view.expand_all(&doc);

            let mut progress = open_progress(&cli.store);
            let html = render::to_printable_html(&doc, &view, progress.get());
            std::fs::write(&output, html)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("Wrote {}", output.display());
        }
    }

    Ok(())
}

/// Fetch a tab's document or fail with the available tab ids
fn fetch_document(
    controller: &mut SyncController<JsonFileStore>,
    tab: &str,
) -> Result<Document> {
    match controller.document(tab)?.cloned() {
        Some(doc) => Ok(doc),
        None => {
            let known: Vec<&str> = controller.tabs().iter().map(|t| t.id.as_str()).collect();
            bail!("no document for tab '{}' (tabs: {})", tab, known.join(", "))
        }
    }
}

/// Open the checklist progress store under the workspace directory
fn open_progress(store_dir: &Path) -> ChecklistProgress<FileKv> {
    ChecklistProgress::open(FileKv::new(store_dir.join("progress.toml")))
}

/// Remove a store directory's contents so it can be reseeded
fn wipe_store(store_dir: &Path) -> Result<()> {
    let tabs = store_dir.join("tabs.json");
    if tabs.exists() {
        std::fs::remove_file(&tabs).with_context(|| format!("removing {}", tabs.display()))?;
    }
    let documents = store_dir.join("documents");
    if documents.exists() {
        std::fs::remove_dir_all(&documents)
            .with_context(|| format!("removing {}", documents.display()))?;
    }
    Ok(())
}
