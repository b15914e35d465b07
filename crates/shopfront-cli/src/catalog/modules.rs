use shopfront_client::Scope;
use shopfront_core::products::ProductModuleInput;
use shopfront_core::{slugify, ProductModule};

use super::{yes_no, ModulesCommands};
use crate::context::{api_failure, App};

pub(crate) async fn run_modules(app: &App, command: ModulesCommands) -> anyhow::Result<()> {
    match command {
        ModulesCommands::List { all } => list(app, all).await,
        ModulesCommands::Show { key, slug } => show(app, &key, slug).await,
        ModulesCommands::Add {
            name,
            slug,
            icon,
            banner,
            description,
            inactive,
        } => {
            let input = ProductModuleInput {
                slug: slug.unwrap_or_else(|| slugify(&name)),
                name,
                icon,
                banner_image: banner,
                description,
                is_active: !inactive,
            };
            add(app, &input).await
        }
        ModulesCommands::Toggle { id } => toggle(app, &id).await,
        ModulesCommands::Delete { id } => delete(app, &id).await,
    }
}

async fn list(app: &App, all: bool) -> anyhow::Result<()> {
    let scope = if all { Scope::Admin } else { Scope::Storefront };
    let mut store = app.store(scope);
    let modules = store
        .refresh_modules()
        .await
        .map_err(|e| api_failure("list modules", e))?;

    if modules.is_empty() {
        println!("no modules found");
        return Ok(());
    }

    println!("{:<26}{:<24}{:<24}ACTIVE", "ID", "NAME", "SLUG");
    for module in modules {
        println!(
            "{:<26}{:<24}{:<24}{}",
            module.id,
            crate::context::truncate(&module.name, 21),
            module.slug,
            yes_no(module.is_active)
        );
    }
    Ok(())
}

async fn show(app: &App, key: &str, by_slug: bool) -> anyhow::Result<()> {
    let result = if by_slug {
        app.client.get_module_by_slug(key).await
    } else {
        app.client.get_module(key).await
    };
    let module = match result {
        Ok(m) => m,
        Err(e) if e.is_not_found() => anyhow::bail!("module '{key}' not found"),
        Err(e) => return Err(api_failure("load module", e)),
    };
    print_module(&module);
    Ok(())
}

fn print_module(module: &ProductModule) {
    println!("Module: {} ({})", module.name, module.id);
    println!("Slug: {}", module.slug);
    println!("Active: {}", yes_no(module.is_active));
    if let Some(icon) = &module.icon {
        println!("Icon: {icon}");
    }
    if let Some(banner) = &module.banner_image {
        println!("Banner: {banner}");
    }
    if let Some(description) = &module.description {
        println!();
        println!("{description}");
    }
}

async fn add(app: &App, input: &ProductModuleInput) -> anyhow::Result<()> {
    let mut store = app.store(Scope::Admin);
    let created = store
        .create_module(input)
        .await
        .map_err(|e| api_failure("create module", e))?;
    tracing::info!(module_id = %created.id, slug = %created.slug, "module created");
    println!("created module {} ({})", created.name, created.id);
    Ok(())
}

async fn toggle(app: &App, id: &str) -> anyhow::Result<()> {
    let mut store = app.store(Scope::Admin);
    let mut module = app
        .client
        .get_module(id)
        .await
        .map_err(|e| api_failure("load module", e))?;
    module.is_active = !module.is_active;
    let updated = store
        .update_module(&module)
        .await
        .map_err(|e| api_failure("update module", e))?;
    println!(
        "module {} is now {}",
        updated.name,
        if updated.is_active { "active" } else { "inactive" }
    );
    Ok(())
}

async fn delete(app: &App, id: &str) -> anyhow::Result<()> {
    if !app.confirm(&format!("Delete module {id}?"))? {
        println!("aborted");
        return Ok(());
    }
    let mut store = app.store(Scope::Admin);
    store
        .delete_module(id)
        .await
        .map_err(|e| api_failure("delete module", e))?;
    tracing::info!(module_id = %id, "module deleted");
    println!("deleted module {id}");
    Ok(())
}
