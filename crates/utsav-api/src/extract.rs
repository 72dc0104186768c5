//! Multipart form extraction for submission requests.

use axum::extract::Multipart;
use utsav_core::models::LanguageMode;
use utsav_core::AppError;

/// Raw attachment as received from the form, before validation.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub data: Vec<u8>,
    pub original_name: String,
    pub content_type: String,
}

/// Parsed submission form.
#[derive(Debug, Clone)]
pub struct SubmissionForm {
    pub district: String,
    pub festival_name: String,
    pub story: String,
    pub language_mode: LanguageMode,
    pub file: Option<UploadedFile>,
}

/// Extract the submission fields and the optional file from a multipart
/// form. Only one field named "file" is accepted; unknown fields are
/// ignored.
pub async fn parse_submission_form(mut multipart: Multipart) -> Result<SubmissionForm, AppError> {
    let mut district: Option<String> = None;
    let mut festival_name: Option<String> = None;
    let mut story = String::new();
    let mut language_mode = LanguageMode::default();
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart form: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "district" => {
                district = Some(read_text(field, "district").await?);
            }
            "festival_name" => {
                festival_name = Some(read_text(field, "festival_name").await?);
            }
            "story" => {
                story = read_text(field, "story").await?;
            }
            "language_mode" => {
                let raw = read_text(field, "language_mode").await?;
                language_mode = LanguageMode::parse(&raw).ok_or_else(|| {
                    AppError::InvalidInput(format!(
                        "language_mode must be 'en', 'te', or 'en_te', got: {}",
                        raw
                    ))
                })?;
            }
            "file" => {
                if file.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }
                let original_name = field
                    .file_name()
                    .map(|s: &str| s.to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                let content_type = field
                    .content_type()
                    .map(|s: &str| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;

                file = Some(UploadedFile {
                    data: data.to_vec(),
                    original_name,
                    content_type,
                });
            }
            _ => {}
        }
    }

    let district =
        district.ok_or_else(|| AppError::InvalidInput("district is required".to_string()))?;
    let festival_name = festival_name
        .ok_or_else(|| AppError::InvalidInput("festival_name is required".to_string()))?;

    Ok(SubmissionForm {
        district,
        festival_name,
        story,
        language_mode,
        file,
    })
}

async fn read_text(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read field '{}': {}", name, e)))
}
