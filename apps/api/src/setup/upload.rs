//! Resume file upload: plain text and PDF are turned into resume text,
//! everything else is refused with a hint to paste the text instead.

use axum::extract::multipart::{Multipart, MultipartError};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::errors::AppError;

pub const FILE_FIELD: &str = "file";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("no 'file' field in upload")]
    MissingFile,

    #[error("unsupported file type '{0}'. Please upload a .txt or .pdf file, or paste your resume text")]
    Unsupported(String),

    #[error("text file is not valid UTF-8")]
    InvalidUtf8,

    #[error("could not extract text from PDF: {0}")]
    Pdf(String),

    #[error("uploaded file contains no readable text")]
    Empty,

    #[error("malformed upload: {0}")]
    Multipart(#[from] MultipartError),
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        AppError::Validation(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    PlainText,
    Pdf,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadedResume {
    pub resume: String,
    pub resume_file_name: String,
}

/// Decides the format from the declared content type, then the extension.
pub fn detect_format(
    file_name: Option<&str>,
    content_type: Option<&str>,
) -> Result<ResumeFormat, UploadError> {
    match content_type {
        Some("text/plain") => return Ok(ResumeFormat::PlainText),
        Some("application/pdf") => return Ok(ResumeFormat::Pdf),
        _ => {}
    }

    let extension = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("txt") => Ok(ResumeFormat::PlainText),
        Some("pdf") => Ok(ResumeFormat::Pdf),
        _ => Err(UploadError::Unsupported(
            content_type
                .or(file_name)
                .unwrap_or("unknown")
                .to_string(),
        )),
    }
}

pub fn extract_text(format: ResumeFormat, bytes: &[u8]) -> Result<String, UploadError> {
    let text = match format {
        ResumeFormat::PlainText => std::str::from_utf8(bytes)
            .map_err(|_| UploadError::InvalidUtf8)?
            .to_string(),
        ResumeFormat::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| UploadError::Pdf(e.to_string()))?
        }
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(UploadError::Empty);
    }
    Ok(text.to_string())
}

/// Reads the first `file` field of a multipart body.
pub async fn read_resume_upload(mut multipart: Multipart) -> Result<UploadedResume, UploadError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("resume").to_string();
        let format = detect_format(Some(file_name.as_str()), field.content_type())?;
        let bytes = field.bytes().await?;
        info!(
            "Extracting resume text from {file_name} ({} bytes, {format:?})",
            bytes.len()
        );

        let resume = tokio::task::spawn_blocking(move || extract_text(format, &bytes))
            .await
            .map_err(|e| UploadError::Pdf(e.to_string()))??;

        return Ok(UploadedResume {
            resume,
            resume_file_name: file_name,
        });
    }
    Err(UploadError::MissingFile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format_by_content_type() {
        assert_eq!(
            detect_format(Some("cv"), Some("application/pdf")).unwrap(),
            ResumeFormat::Pdf
        );
        assert_eq!(
            detect_format(None, Some("text/plain")).unwrap(),
            ResumeFormat::PlainText
        );
    }

    #[test]
    fn test_detect_format_by_extension() {
        assert_eq!(
            detect_format(Some("Resume.PDF"), Some("application/octet-stream")).unwrap(),
            ResumeFormat::Pdf
        );
        assert_eq!(
            detect_format(Some("resume.txt"), None).unwrap(),
            ResumeFormat::PlainText
        );
    }

    #[test]
    fn test_word_documents_are_refused() {
        let err = detect_format(
            Some("resume.docx"),
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        )
        .unwrap_err();
        assert!(matches!(err, UploadError::Unsupported(_)));
        assert!(err.to_string().contains("paste your resume text"));
    }

    #[test]
    fn test_plain_text_is_trimmed() {
        let text = extract_text(ResumeFormat::PlainText, b"\n  Jane Doe\nRust engineer  \n").unwrap();
        assert_eq!(text, "Jane Doe\nRust engineer");
    }

    #[test]
    fn test_invalid_utf8_and_empty_files_are_refused() {
        assert!(matches!(
            extract_text(ResumeFormat::PlainText, &[0xff, 0xfe, 0x00]),
            Err(UploadError::InvalidUtf8)
        ));
        assert!(matches!(
            extract_text(ResumeFormat::PlainText, b"   \n"),
            Err(UploadError::Empty)
        ));
    }

    #[test]
    fn test_garbage_pdf_is_an_upload_error() {
        assert!(matches!(
            extract_text(ResumeFormat::Pdf, b"definitely not a pdf"),
            Err(UploadError::Pdf(_))
        ));
    }
}
