//! Image upload command handlers.

use std::path::PathBuf;

use clap::Subcommand;

use crate::context::{api_failure, App};

/// Sub-commands available under `upload`.
#[derive(Debug, Subcommand)]
pub enum UploadCommands {
    /// Upload one or more images and print their URLs
    Image {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Delete an uploaded image by its public id
    Delete { public_id: String },
}

pub(crate) async fn run_upload(app: &App, command: UploadCommands) -> anyhow::Result<()> {
    match command {
        UploadCommands::Image { paths } => {
            let images = if let [single] = paths.as_slice() {
                vec![app
                    .client
                    .upload_image(single)
                    .await
                    .map_err(|e| api_failure("upload image", e))?]
            } else {
                app.client
                    .upload_images(&paths)
                    .await
                    .map_err(|e| api_failure("upload images", e))?
            };

            println!("{:<40}URL", "PUBLIC ID");
            for image in &images {
                println!("{:<40}{}", image.public_id, image.best_url());
            }
            tracing::info!(count = images.len(), "images uploaded");
            Ok(())
        }
        UploadCommands::Delete { public_id } => {
            if !app.confirm(&format!("Delete image {public_id}?"))? {
                println!("aborted");
                return Ok(());
            }
            app.client
                .delete_image(&public_id)
                .await
                .map_err(|e| api_failure("delete image", e))?;
            tracing::info!(public_id = %public_id, "image deleted");
            println!("deleted image {public_id}");
            Ok(())
        }
    }
}
