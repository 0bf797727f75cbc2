//! Common utilities for the file upload handler

use axum::extract::Multipart;
use corkboard_core::AppError;
use corkboard_storage::DEFAULT_FOLDER;

/// Fields read out of the upload form.
pub struct ImageUpload {
    pub data: Vec<u8>,
    pub original_filename: String,
    pub declared_mime: String,
    pub folder: String,
}

/// Extract the image file and optional folder hint from multipart form data.
/// Only one field named "image" is accepted; multiple file fields are rejected.
pub async fn extract_image_multipart(mut multipart: Multipart) -> Result<ImageUpload, AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;
    let mut declared_mime: Option<String> = None;
    let mut folder: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "image" => {
                if file_data.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple image fields are not allowed; send exactly one field named 'image'".to_string(),
                    ));
                }
                filename = field.file_name().map(|s: &str| s.to_string());
                declared_mime = field.content_type().map(|s: &str| s.to_string());

                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read image data: {}", e))
                })?;
                file_data = Some(data.to_vec());
            }
            "folder" => {
                let text = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read folder field: {}", e))
                })?;
                folder = Some(text);
            }
            _ => {}
        }
    }

    let data = file_data.ok_or_else(|| AppError::InvalidInput("Image file is required.".to_string()))?;

    Ok(ImageUpload {
        data,
        original_filename: filename.unwrap_or_default(),
        declared_mime: declared_mime
            .unwrap_or_else(|| "application/octet-stream".to_string()),
        folder: folder.unwrap_or_else(|| DEFAULT_FOLDER.to_string()),
    })
}

/// Enforce the configured upload size limit.
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "Image too large. Max {} bytes.",
            max_size
        )));
    }
    Ok(())
}
