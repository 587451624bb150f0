//! DOCX export of the current blueprint.
//!
//! Layout: `Heading1` job title, then for each section a `Heading2` label
//! followed by one plain paragraph per item, in original order.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, Style, StyleType};
use tracing::info;

use crate::blueprint::models::{Blueprint, Section};
use crate::errors::AppError;
use crate::state::AppState;

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const HEADING_1: &str = "Heading1";
const HEADING_2: &str = "Heading2";

/// `<jobTitle> Blueprint.docx`
pub fn document_filename(blueprint: &Blueprint) -> String {
    format!("{} Blueprint.docx", blueprint.job_title)
}

pub fn export_as_document(blueprint: Option<&Blueprint>) -> Result<Vec<u8>, AppError> {
    let blueprint = blueprint.ok_or(AppError::NoBlueprint)?;

    let mut docx = Docx::new()
        .add_style(
            Style::new(HEADING_1, StyleType::Paragraph)
                .name("Heading 1")
                .size(32)
                .bold(),
        )
        .add_style(
            Style::new(HEADING_2, StyleType::Paragraph)
                .name("Heading 2")
                .size(26)
                .bold(),
        )
        .add_paragraph(text_paragraph(&blueprint.job_title).style(HEADING_1));

    for section in Section::ALL {
        docx = docx.add_paragraph(text_paragraph(&format!("{}:", section.label())).style(HEADING_2));
        for item in blueprint.items(section) {
            docx = docx.add_paragraph(text_paragraph(item));
        }
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| AppError::Export(e.to_string()))?;
    Ok(buf.into_inner())
}

fn text_paragraph(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

/// Packs the current blueprint on a blocking worker. Returns `(filename, bytes)`.
pub async fn export_current(state: &AppState) -> Result<(String, Vec<u8>), AppError> {
    let blueprint = state.current_blueprint().await.ok_or(AppError::NoBlueprint)?;
    let filename = document_filename(&blueprint);

    let bytes = tokio::task::spawn_blocking(move || export_as_document(Some(&blueprint)))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    info!("Exported '{filename}' ({} bytes)", bytes.len());
    Ok((filename, bytes))
}

/// `Content-Disposition` value with an ASCII fallback and an RFC 5987 UTF-8 name.
pub fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let encoded: String = filename
        .bytes()
        .map(|b| {
            if b.is_ascii_alphanumeric() || b"-._~".contains(&b) {
                (b as char).to_string()
            } else {
                format!("%{b:02X}")
            }
        })
        .collect();

    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}
