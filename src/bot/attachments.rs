//! Saving Discord attachments under the upload directory.

use crate::{core::uploads, errors::Result};
use poise::serenity_prelude as serenity;
use std::path::{Path, PathBuf};

/// Downloads `attachment` and stores it under [`uploads::UPLOAD_DIR`].
///
/// # Errors
/// Fails before downloading if the file name has no extension.
pub async fn save_attachment(attachment: &serenity::Attachment) -> Result<PathBuf> {
    let dir = Path::new(uploads::UPLOAD_DIR);
    uploads::split_extension(&attachment.filename).ok_or_else(|| {
        crate::errors::Error::MissingExtension {
            filename: attachment.filename.clone(),
        }
    })?;

    let bytes = attachment.download().await?;
    uploads::save_file(dir, &attachment.filename, &bytes).await
}
