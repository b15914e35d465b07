//! WhatsApp inquiry command handlers.
//!
//! `inquire` is the customer side: it validates the form, prints the
//! `wa.me` link and waits for the background log call before exiting. The
//! `inquiries` subcommands are the admin review screens.

use clap::Subcommand;
use shopfront_client::{InquiryDispatcher, InquiryError};
use shopfront_core::inquiry::InquiryFilter;
use shopfront_core::{InquiryForm, InquiryStatus};

use crate::context::{api_failure, fmt_money, truncate, App};

/// Sub-commands available under `inquiries`.
#[derive(Debug, Subcommand)]
pub enum InquiriesCommands {
    /// List inquiries
    List {
        /// pending, responded or closed
        #[arg(long)]
        status: Option<InquiryStatus>,
        /// Only inquiries about this product (id)
        #[arg(long)]
        product: Option<String>,
        /// Only inquiries from this user (id)
        #[arg(long)]
        user: Option<String>,
    },
    /// Show an inquiry with the message that was sent
    Show { id: String },
    /// Counts per status
    Stats,
    /// Mark an inquiry responded or closed
    Status { id: String, status: InquiryStatus },
    /// Resend an inquiry through the WhatsApp Business API
    Resend { id: String },
    /// Delete an inquiry
    Delete { id: String },
}

/// Form fields given on the command line; anything missing falls back to
/// the prefilled form.
#[derive(Debug, Default)]
pub(crate) struct FormOverrides {
    pub(crate) message: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) phone: Option<String>,
}

impl FormOverrides {
    fn apply(self, form: &mut InquiryForm) {
        if let Some(message) = self.message {
            form.message = message;
        }
        if let Some(name) = self.name {
            form.user_name = name;
        }
        if let Some(email) = self.email {
            form.user_email = email;
        }
        if let Some(phone) = self.phone {
            form.user_phone = phone;
        }
    }
}

pub(crate) async fn run_inquire(
    app: &App,
    product_id: &str,
    overrides: FormOverrides,
) -> anyhow::Result<()> {
    let product = match app.client.get_product(product_id).await {
        Ok(p) => p,
        Err(e) if e.is_not_found() => anyhow::bail!("product '{product_id}' not found"),
        Err(e) => return Err(api_failure("load product", e)),
    };

    let dispatcher =
        InquiryDispatcher::load(app.client.clone(), &app.config.storefront_origin).await;

    let mut form = InquiryForm::prefilled(
        &product,
        app.config.user_name.as_deref(),
        app.config.user_email.as_deref(),
    );
    overrides.apply(&mut form);

    let at = chrono::Local::now().naive_local();
    let dispatch = match dispatcher.send(&product, &form, &at) {
        Ok(d) => d,
        Err(InquiryError::Invalid(e)) => {
            eprintln!("warning: {e}");
            return Ok(());
        }
    };

    println!("{}", dispatch.message);
    println!();
    println!("Open in WhatsApp:");
    println!("{}", dispatch.whatsapp_url);

    if let Err(e) = dispatch.log_task.await {
        tracing::warn!(error = %e, "inquiry log task did not complete");
    }
    Ok(())
}

pub(crate) async fn run_inquiries(app: &App, command: InquiriesCommands) -> anyhow::Result<()> {
    match command {
        InquiriesCommands::List {
            status,
            product,
            user,
        } => {
            let filter = InquiryFilter {
                status,
                product_id: product,
                user_id: user,
            };
            list(app, &filter).await
        }
        InquiriesCommands::Show { id } => show(app, &id).await,
        InquiriesCommands::Stats => stats(app).await,
        InquiriesCommands::Status { id, status } => set_status(app, &id, status).await,
        InquiriesCommands::Resend { id } => resend(app, &id).await,
        InquiriesCommands::Delete { id } => delete(app, &id).await,
    }
}

async fn list(app: &App, filter: &InquiryFilter) -> anyhow::Result<()> {
    let inquiries = app
        .client
        .list_inquiries(filter)
        .await
        .map_err(|e| api_failure("list inquiries", e))?;

    if inquiries.is_empty() {
        println!("no inquiries found");
        return Ok(());
    }

    println!(
        "{:<26}{:<12}{:<11}{:<20}{:<26}MESSAGE",
        "ID", "DATE", "STATUS", "CUSTOMER", "PRODUCT"
    );
    for inquiry in &inquiries {
        let date = inquiry
            .created_at
            .map_or_else(|| "\u{2014}".to_string(), |d| d.format("%Y-%m-%d").to_string());
        println!(
            "{:<26}{:<12}{:<11}{:<20}{:<26}{}",
            inquiry.id.as_deref().unwrap_or("\u{2014}"),
            date,
            inquiry.status.to_string(),
            truncate(&inquiry.user_name, 17),
            truncate(&inquiry.product_name, 23),
            truncate(&inquiry.message, 40)
        );
    }
    Ok(())
}

async fn show(app: &App, id: &str) -> anyhow::Result<()> {
    let inquiry = match app.client.get_inquiry(id).await {
        Ok(i) => i,
        Err(e) if e.is_not_found() => anyhow::bail!("inquiry '{id}' not found"),
        Err(e) => return Err(api_failure("load inquiry", e)),
    };

    println!("Inquiry: {id}");
    println!("Status: {}", inquiry.status);
    if let Some(created) = inquiry.created_at {
        println!("Received: {}", created.format("%Y-%m-%d %H:%M"));
    }
    println!();
    println!("Customer: {}", inquiry.user_name);
    if let Some(email) = &inquiry.user_email {
        println!("Email: {email}");
    }
    if let Some(phone) = &inquiry.user_phone {
        println!("Phone: {phone}");
    }
    println!();
    println!(
        "Product: {} ({})",
        inquiry.product_name,
        fmt_money(inquiry.product_price)
    );
    println!("Link: {}", inquiry.product_link);
    println!();
    println!("{}", inquiry.message);
    if let Some(url) = &inquiry.whatsapp_url {
        println!();
        println!("WhatsApp: {url}");
    }
    Ok(())
}

async fn stats(app: &App) -> anyhow::Result<()> {
    let stats = app
        .client
        .inquiry_stats()
        .await
        .map_err(|e| api_failure("load inquiry stats", e))?;
    println!("{:<12}{:>6}", "Total", stats.total);
    println!("{:<12}{:>6}", "Pending", stats.pending);
    println!("{:<12}{:>6}", "Responded", stats.responded);
    println!("{:<12}{:>6}", "Closed", stats.closed);
    Ok(())
}

async fn set_status(app: &App, id: &str, next: InquiryStatus) -> anyhow::Result<()> {
    let inquiry = app
        .client
        .get_inquiry(id)
        .await
        .map_err(|e| api_failure("load inquiry", e))?;
    if !inquiry.status.can_transition_to(next) {
        eprintln!(
            "warning: inquiry {id} is {} and cannot move to {next}",
            inquiry.status
        );
        return Ok(());
    }

    app.client
        .update_inquiry_status(id, next)
        .await
        .map_err(|e| api_failure("update inquiry status", e))?;
    tracing::info!(inquiry_id = %id, status = %next, "inquiry status updated");
    println!("inquiry {id} is now {next}");
    Ok(())
}

async fn resend(app: &App, id: &str) -> anyhow::Result<()> {
    let outcome = app
        .client
        .resend_inquiry(id)
        .await
        .map_err(|e| api_failure("resend inquiry", e))?;
    if outcome.success {
        println!(
            "resent inquiry {id}{}",
            outcome
                .message_id
                .map(|m| format!(" (message {m})"))
                .unwrap_or_default()
        );
    } else {
        let reason = outcome
            .error
            .or(outcome.message)
            .unwrap_or_else(|| "unknown error".to_string());
        tracing::warn!(inquiry_id = %id, reason = %reason, "inquiry resend failed");
        eprintln!("error: resend failed: {reason}");
    }
    Ok(())
}

async fn delete(app: &App, id: &str) -> anyhow::Result<()> {
    if !app.confirm(&format!("Delete inquiry {id}?"))? {
        println!("aborted");
        return Ok(());
    }
    app.client
        .delete_inquiry(id)
        .await
        .map_err(|e| api_failure("delete inquiry", e))?;
    tracing::info!(inquiry_id = %id, "inquiry deleted");
    println!("deleted inquiry {id}");
    Ok(())
}
