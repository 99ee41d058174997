//! CLI commands implementation

use anyhow::Result;
use modelshop_core::{Category, CategoryFilter, ModelRecord, UploadDraft, UploadFile};
use modelshop_store::CatalogStore;
use modelshop_sync::{CatalogSync, CatalogViewState, PreviewScene, ViewMode};
use std::path::PathBuf;
use std::sync::Arc;

use crate::client::ApiClient;

fn parse_filter(category: Option<&str>) -> Result<CategoryFilter> {
    match category {
        Some(name) => Ok(name.parse()?),
        None => Ok(CategoryFilter::All),
    }
}

fn price_label(model: &ModelRecord) -> String {
    if model.is_free() {
        "Free".to_string()
    } else {
        format!("${:.2}", model.price)
    }
}

/// Browse the catalog
pub async fn ls(client: Arc<ApiClient>, category: Option<String>, list: bool) -> Result<()> {
    let filter = parse_filter(category.as_deref())?;

    let sync = Arc::new(CatalogSync::new(client));
    let mut view = CatalogViewState::new(sync);
    if list {
        view.set_view_mode(ViewMode::List);
    }
    view.select_category(filter).await;

    let snapshot = view.sync().snapshot().await;
    if let Some(error) = &snapshot.error {
        eprintln!("Failed to fetch models: {}", error);
        if snapshot.models.is_empty() {
            return Ok(());
        }
        eprintln!("Showing the last fetched catalog instead.");
    }

    if snapshot.models.is_empty() {
        println!("No models found");
        return Ok(());
    }

    println!(
        "{} models found{}",
        snapshot.models.len(),
        match view.category() {
            CategoryFilter::All => String::new(),
            CategoryFilter::Only(c) => format!(" in {}", c),
        }
    );
    println!();

    match view.view_mode() {
        ViewMode::List => print_list(&snapshot.models),
        ViewMode::Grid => print_grid(&snapshot.models),
    }

    Ok(())
}

fn print_list(models: &[ModelRecord]) {
    println!(
        "{:<8} {:<22} {:<16} {:<14} {:>8} {:>7} {:>10}",
        "ID", "NAME", "AUTHOR", "CATEGORY", "PRICE", "RATING", "DOWNLOADS"
    );
    println!("{}", "-".repeat(92));
    for model in models {
        println!(
            "{:<8} {:<22} {:<16} {:<14} {:>8} {:>7.1} {:>10}",
            model.id,
            model.name,
            model.author,
            model.category.to_string(),
            price_label(model),
            model.rating,
            model.downloads
        );
    }
}

fn print_grid(models: &[ModelRecord]) {
    for row in models.chunks(3) {
        for model in row {
            print!("{:<28}", format!("[{}] {}", model.id, model.name));
        }
        println!();
        for model in row {
            print!(
                "{:<28}",
                format!("    {} · {}", model.category, price_label(model))
            );
        }
        println!();
        println!();
    }
}

/// Show one model in detail, or the empty preview pane
pub async fn show(client: Arc<ApiClient>, id: Option<String>) -> Result<()> {
    let sync = Arc::new(CatalogSync::new(client));
    let mut view = CatalogViewState::new(sync);
    view.select_category(CategoryFilter::All).await;

    if let Some(id) = id {
        view.select_model(&id).await;
        if view.selected_record().await.is_none() {
            println!("Model '{}' not found", id);
            return Ok(());
        }
    }

    match (view.selected_record().await, view.preview_scene().await) {
        (Some(model), PreviewScene::Asset { url, name }) => {
            println!("{}", name);
            println!("  by {}", model.author);
            println!("  Category:  {}", model.category);
            println!("  Price:     {}", price_label(&model));
            println!("  Rating:    {:.1}/5", model.rating);
            println!("  Downloads: {}", model.downloads);
            if let Some(description) = &model.description {
                println!("  {}", description);
            }
            if let Some(tags) = &model.tags {
                println!("  Tags: {}", tags.join(", "));
            }
            println!();
            println!("  Preview: {}", url);
        }
        _ => {
            println!("3D Model Viewer");
            println!("Select a model from the catalog to preview it here");
        }
    }

    Ok(())
}

/// Record a download and print the asset URL
pub async fn download(client: Arc<ApiClient>, id: String) -> Result<()> {
    let models = client.query_models(CategoryFilter::All).await?;
    let model = match models.into_iter().find(|m| m.id == id) {
        Some(model) => model,
        None => {
            eprintln!("Model '{}' not found", id);
            return Ok(());
        }
    };

    match client.increment_downloads(&id).await {
        Ok(()) => {
            println!("Downloaded {}", model.name);
            println!("  Asset: {}", client.resolve_public_url(&model.file_path));
        }
        Err(e) => {
            eprintln!("Failed to record download: {}", e);
        }
    }

    Ok(())
}

/// List the catalog categories
pub fn categories() {
    println!("All");
    for category in Category::ALL {
        println!("{}", category);
    }
}

/// Submit an upload draft for validation
#[allow(clippy::too_many_arguments)]
pub async fn upload(
    client: Arc<ApiClient>,
    name: String,
    category: String,
    price: f64,
    description: Option<String>,
    tags: Option<String>,
    files: Vec<PathBuf>,
) -> Result<()> {
    let category: Category = category.parse()?;

    let mut draft_files = Vec::new();
    for path in &files {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        draft_files.push(UploadFile {
            name,
            size: metadata.len(),
        });
    }

    let draft = UploadDraft {
        name,
        category,
        price,
        description,
        tags: tags
            .map(|t| t.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_default(),
        files: draft_files,
    };

    // Catch obvious mistakes before going over the wire
    draft.validate()?;

    let receipt = client.submit_upload(&draft).await?;
    println!("Draft '{}' accepted", receipt.name);
    println!("  {}", receipt.message);

    Ok(())
}

/// Show system status
pub async fn top(client: Arc<ApiClient>) -> Result<()> {
    let status = client.status().await?;

    println!("modelshop v{}", status.version);
    println!();
    println!("Backend:    {}", status.backend);
    println!("Models:     {}", status.models);
    println!("Categories: {}", status.categories);

    Ok(())
}
