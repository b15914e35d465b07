use shopfront_client::{Scope, StoreError};
use shopfront_core::catalog::{categories_for_module, main_categories, subcategories_of};
use shopfront_core::products::CategoryInput;
use shopfront_core::{slugify, Category};

use super::{activity, yes_no, CategoriesCommands};
use crate::context::{api_failure, App};

pub(crate) async fn run_categories(app: &App, command: CategoriesCommands) -> anyhow::Result<()> {
    match command {
        CategoriesCommands::List { module } => list(app, module.as_deref()).await,
        CategoriesCommands::Tree { module } => tree(app, module.as_deref()).await,
        CategoriesCommands::Add {
            name,
            module,
            parent,
            slug,
            description,
            image,
            inactive,
        } => {
            let input = CategoryInput {
                slug: slug.unwrap_or_else(|| slugify(&name)),
                name,
                product_module_id: module,
                parent_category_id: parent,
                description,
                image,
                is_active: !inactive,
            };
            add(app, &input).await
        }
        CategoriesCommands::Update {
            id,
            name,
            parent,
            no_parent,
            description,
            active,
            inactive,
        } => {
            let edit = CategoryEdit {
                name,
                parent: if no_parent { Some(None) } else { parent.map(Some) },
                description,
                active: activity(active, inactive),
            };
            update(app, &id, edit).await
        }
        CategoriesCommands::Delete { id } => delete(app, &id).await,
    }
}

/// Fields changed by `categories update`. `parent` is `Some(None)` when the
/// category is promoted to a main category.
struct CategoryEdit {
    name: Option<String>,
    parent: Option<Option<String>>,
    description: Option<String>,
    active: Option<bool>,
}

async fn load_all(app: &App) -> anyhow::Result<Vec<Category>> {
    let mut store = app.store(Scope::Admin);
    let categories = store
        .refresh_categories()
        .await
        .map_err(|e| api_failure("list categories", e))?;
    Ok(categories.to_vec())
}

fn for_module(categories: &[Category], module: Option<&str>) -> Vec<Category> {
    match module {
        Some(m) => categories_for_module(categories, m).into_iter().cloned().collect(),
        None => categories.to_vec(),
    }
}

async fn list(app: &App, module: Option<&str>) -> anyhow::Result<()> {
    let categories = for_module(&load_all(app).await?, module);
    if categories.is_empty() {
        println!("no categories found");
        return Ok(());
    }

    println!(
        "{:<26}{:<24}{:<26}{:<26}ACTIVE",
        "ID", "NAME", "MODULE", "PARENT"
    );
    for category in &categories {
        println!(
            "{:<26}{:<24}{:<26}{:<26}{}",
            category.id,
            crate::context::truncate(&category.name, 21),
            category.product_module_id,
            category.parent_category_id.as_deref().unwrap_or("\u{2014}"),
            yes_no(category.is_active)
        );
    }
    Ok(())
}

async fn tree(app: &App, module: Option<&str>) -> anyhow::Result<()> {
    let categories = for_module(&load_all(app).await?, module);
    let mains = main_categories(&categories);
    if mains.is_empty() {
        println!("no categories found");
        return Ok(());
    }

    for main in mains {
        println!("{} ({})", main.name, main.id);
        for sub in subcategories_of(&categories, &main.id) {
            println!("  - {} ({})", sub.name, sub.id);
        }
    }
    Ok(())
}

async fn add(app: &App, input: &CategoryInput) -> anyhow::Result<()> {
    let mut store = app.store(Scope::Admin);
    store
        .refresh_categories()
        .await
        .map_err(|e| api_failure("list categories", e))?;

    match store.create_category(input).await {
        Ok(created) => {
            tracing::info!(category_id = %created.id, "category created");
            let kind = if created.is_subcategory() {
                "subcategory"
            } else {
                "category"
            };
            println!("created {kind} {} ({})", created.name, created.id);
            Ok(())
        }
        Err(StoreError::Catalog(e)) => anyhow::bail!("invalid parent: {e}"),
        Err(e) => Err(api_failure("create category", e)),
    }
}

async fn update(app: &App, id: &str, edit: CategoryEdit) -> anyhow::Result<()> {
    let mut store = app.store(Scope::Admin);
    let categories = store
        .refresh_categories()
        .await
        .map_err(|e| api_failure("list categories", e))?;
    let mut category = categories
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("category '{id}' not found"))?;

    if let Some(name) = edit.name {
        category.name = name;
    }
    if let Some(parent) = edit.parent {
        category.parent_category_id = parent;
    }
    if let Some(description) = edit.description {
        category.description = Some(description);
    }
    if let Some(active) = edit.active {
        category.is_active = active;
    }

    match store.update_category(&category).await {
        Ok(updated) => {
            tracing::info!(category_id = %updated.id, "category updated");
            println!("updated category {} ({})", updated.name, updated.id);
            Ok(())
        }
        Err(StoreError::Catalog(e)) => anyhow::bail!("invalid parent: {e}"),
        Err(e) => Err(api_failure("update category", e)),
    }
}

async fn delete(app: &App, id: &str) -> anyhow::Result<()> {
    if !app.confirm(&format!("Delete category {id}?"))? {
        println!("aborted");
        return Ok(());
    }
    let mut store = app.store(Scope::Admin);
    store
        .delete_category(id)
        .await
        .map_err(|e| api_failure("delete category", e))?;
    tracing::info!(category_id = %id, "category deleted");
    println!("deleted category {id}");
    Ok(())
}
