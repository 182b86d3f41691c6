use clap::Parser;
use tracing_subscriber::EnvFilter;

use menu_engineer_rs::cli::{Cli, Command};
use menu_engineer_rs::engine::{
    aggregate_by_period, aggregate_with, analyze_menu, channel_breakdown, project_savings,
    EngineConfig,
};
use menu_engineer_rs::error::{MenuError, Result};
use menu_engineer_rs::interface::{
    display_costing, display_fiscal, display_menu, display_periods, display_projection,
    prompt_overrides, prompt_yes_no, resolve_sku,
};
use menu_engineer_rs::models::EntryKind;
use menu_engineer_rs::state::{
    import_ledger_csv, load_vision, JsonLedgerStore, JsonRecipeStore, LedgerRepository, MenuBook,
    RecipeRepository,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = EngineConfig::load_or_default(cli.config.as_ref())?;
    let command = cli.command.unwrap_or_default();

    let recipes = JsonRecipeStore::new(&cli.recipes);
    let ledger = JsonLedgerStore::new(&cli.ledger);

    match command {
        Command::Menu => cmd_menu(&recipes, &config),
        Command::Costing { sku } => cmd_costing(&recipes, &sku, &config),
        Command::WhatIf { sku } => cmd_what_if(&recipes, &sku),
        Command::Fiscal { vision, monthly } => {
            cmd_fiscal(&ledger, vision.as_deref(), monthly, &config)
        }
        Command::Essential { sku, off } => cmd_essential(recipes, &sku, !off),
        Command::Import { kind, csv } => cmd_import(ledger, kind, &csv),
        Command::DeleteEntry { kind, index } => cmd_delete_entry(ledger, kind, index),
    }
}

/// Load recipes into a book, failing if there are none.
fn load_book(store: &JsonRecipeStore) -> Result<MenuBook> {
    if !store.path().exists() {
        eprintln!("Recipe file not found: {:?}", store.path());
        return Err(MenuError::NoRecipes);
    }
    let book = MenuBook::new(store.load_recipes()?);
    if book.is_empty() {
        return Err(MenuError::NoRecipes);
    }
    Ok(book)
}

/// Classify and summarize the whole menu.
fn cmd_menu(store: &JsonRecipeStore, config: &EngineConfig) -> Result<()> {
    let book = load_book(store)?;
    println!("Loaded {} recipes", book.len());

    let items = book.items(config);
    let analysis = analyze_menu(&items);
    display_menu(&items, &analysis);
    Ok(())
}

/// Cost breakdown for one recipe.
fn cmd_costing(store: &JsonRecipeStore, query: &str, config: &EngineConfig) -> Result<()> {
    let book = load_book(store)?;
    let sku = resolve_sku(&book, query)?;

    let item = book.item(&sku, config)?;
    let recipe = book
        .get(&sku)
        .and_then(MenuBook::costable)
        .ok_or_else(|| MenuError::RecipeNotFound(sku.clone()))?;

    display_costing(&recipe, &item, config);
    Ok(())
}

/// Interactive savings projection.
fn cmd_what_if(store: &JsonRecipeStore, query: &str) -> Result<()> {
    let book = load_book(store)?;
    let sku = resolve_sku(&book, query)?;
    let recipe = book
        .get(&sku)
        .and_then(MenuBook::costable)
        .ok_or_else(|| MenuError::RecipeNotFound(sku.clone()))?;

    if recipe.ingredients.is_empty() {
        println!("{} has no costable ingredients.", recipe.name);
        return Ok(());
    }

    let overrides = prompt_overrides(&recipe)?;
    let projection = project_savings(&recipe, &overrides);
    display_projection(&recipe, &projection);
    Ok(())
}

/// Fiscal snapshot from the ledger plus optional vision data.
fn cmd_fiscal(
    store: &JsonLedgerStore,
    vision_path: Option<&std::path::Path>,
    monthly: bool,
    config: &EngineConfig,
) -> Result<()> {
    let (ledger, mut unreadable) = store.load_checked()?;
    let vision = vision_path.map(load_vision).transpose()?;

    println!("Loaded {} ledger entries", ledger.len());

    let mut aggregate = aggregate_with(&ledger, vision.as_ref(), config);
    unreadable.append(&mut aggregate.rejected);
    aggregate.rejected = unreadable;
    let channels = channel_breakdown(&ledger);
    display_fiscal(&aggregate, &channels);

    if monthly {
        display_periods(&aggregate_by_period(&ledger, config));
    }
    Ok(())
}

/// Toggle the essential flag.
fn cmd_essential(mut store: JsonRecipeStore, query: &str, essential: bool) -> Result<()> {
    let book = load_book(&store)?;
    let sku = resolve_sku(&book, query)?;

    store.set_essential(&sku, essential)?;
    if essential {
        println!("{} marked as essential.", sku);
    } else {
        println!("{} is no longer essential.", sku);
    }
    Ok(())
}

/// Append CSV rows to the ledger.
fn cmd_import(mut store: JsonLedgerStore, kind: EntryKind, csv_path: &std::path::Path) -> Result<()> {
    let entries = import_ledger_csv(csv_path, kind)?;
    let read = entries.len();

    if read == 0 {
        println!("No rows found in {:?}.", csv_path);
        return Ok(());
    }

    let stored = store.append(entries)?;
    println!("Imported {} of {} {} rows.", stored, read, kind);
    if stored < read {
        println!("{} rows were invalid and skipped (see warnings).", read - stored);
    }
    Ok(())
}

/// Delete one ledger entry after confirmation.
fn cmd_delete_entry(mut store: JsonLedgerStore, kind: EntryKind, index: usize) -> Result<()> {
    let ledger = store.load()?;
    if index >= ledger.count(kind) {
        return Err(MenuError::EntryNotFound {
            kind: kind.as_str(),
            index,
        });
    }

    let confirm = prompt_yes_no(&format!("Delete {} entry #{}?", kind, index), false)?;
    if !confirm {
        println!("Nothing deleted.");
        return Ok(());
    }

    let removed = store.delete(kind, index)?;
    println!("Deleted {} entry dated {}.", kind, removed.date());
    Ok(())
}
