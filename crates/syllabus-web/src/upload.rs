use axum::extract::Multipart;

/// An uploaded syllabus PDF.
pub struct UploadedPdf {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Pull the `file` field out of a multipart upload and check it is a PDF.
///
/// Errors are user-facing messages for a 400 response.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<UploadedPdf, String> {
    let mut file: Option<UploadedPdf> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Failed to read form field: {}", e))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            let filename = field.file_name().unwrap_or("").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| format!("Failed to read file data: {}", e))?
                .to_vec();
            file = Some(UploadedPdf { filename, data });
        } else {
            // Ignore unknown fields
            let _ = field.bytes().await;
        }
    }

    let file = file.ok_or("No file uploaded")?;
    check_pdf(&file.filename, &file.data)?;
    Ok(file)
}

/// Require a `.pdf` name and the PDF magic bytes.
fn check_pdf(filename: &str, data: &[u8]) -> Result<(), String> {
    if !filename.to_lowercase().ends_with(".pdf") {
        return Err("Only PDF files allowed".to_string());
    }
    if !data.starts_with(b"%PDF-") {
        return Err("File has .pdf extension but doesn't appear to be a valid PDF".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_pdf() {
        assert!(check_pdf("syllabus.pdf", b"%PDF-1.7\n").is_ok());
        assert!(check_pdf("SYLLABUS.PDF", b"%PDF-1.4\n").is_ok());
        assert_eq!(
            check_pdf("syllabus.docx", b"%PDF-1.7").unwrap_err(),
            "Only PDF files allowed"
        );
        assert!(check_pdf("syllabus.pdf", b"PK\x03\x04").is_err());
    }
}
