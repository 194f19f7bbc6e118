//! CLI Extraction Commands
//!
//! `analyze` and `lines` call the provider; `resolve` runs the resolver on a
//! saved Textract response without touching the network.

use std::path::Path;

use anyhow::{Context, Result};
use bytes::Bytes;
use formscan_core::{
    join_lines, resolve_key_values, DocumentFormat, Extraction, ScanError, WireResponse,
};
use tracing::warn;

use crate::config::Config;

pub async fn analyze(config: &Config, file: &Path, filter: Option<&str>) -> Result<()> {
    let service = config.build_service()?;
    let document = read_document(file).await?;
    let extraction = service.extract(Some(document), filter).await?;
    println!("{}", render_extraction(&extraction)?);
    Ok(())
}

pub async fn lines(config: &Config, file: &Path) -> Result<()> {
    let service = config.build_service()?;
    let document = read_document(file).await?;
    println!("{}", service.lines(&document).await?);
    Ok(())
}

pub async fn resolve(file: &Path, filter: Option<&str>, lines: bool) -> Result<()> {
    let raw = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    println!("{}", resolve_saved_response(&raw, filter, lines)?);
    Ok(())
}

async fn read_document(file: &Path) -> Result<Bytes> {
    if DocumentFormat::from_path(file).is_none() {
        warn!(file = %file.display(), "Extension is not png, jpg, tiff or pdf; relying on content sniffing");
    }
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    Ok(Bytes::from(bytes))
}

fn render_extraction(extraction: &Extraction) -> Result<String> {
    Ok(match extraction {
        Extraction::Fields(fields) => serde_json::to_string_pretty(fields)?,
        Extraction::Field(value) => value.clone(),
    })
}

fn resolve_saved_response(raw: &str, filter: Option<&str>, lines: bool) -> Result<String> {
    let blocks = WireResponse::from_json(raw)
        .context("Not a Textract JSON response")?
        .into_blocks();

    if lines {
        return Ok(join_lines(&blocks));
    }

    let mut fields = resolve_key_values(&blocks);
    let extraction = match filter {
        Some(field) => fields
            .swap_remove(field)
            .map(Extraction::Field)
            .ok_or_else(|| ScanError::InvalidField(field.to_string()))?,
        None => Extraction::Fields(fields),
    };
    render_extraction(&extraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "Blocks": [
            { "BlockType": "LINE", "Id": "l1", "Text": "Vencimento 10/05/2024" },
            { "BlockType": "KEY_VALUE_SET", "Id": "k1", "EntityTypes": ["KEY"],
              "Relationships": [{ "Type": "VALUE", "Ids": ["v1"] }, { "Type": "CHILD", "Ids": ["w1"] }] },
            { "BlockType": "KEY_VALUE_SET", "Id": "v1", "EntityTypes": ["VALUE"],
              "Relationships": [{ "Type": "CHILD", "Ids": ["w2"] }] },
            { "BlockType": "WORD", "Id": "w1", "Text": "Vencimento" },
            { "BlockType": "WORD", "Id": "w2", "Text": "10/05/2024" },
            { "BlockType": "LINE", "Id": "l2", "Text": "Valor R$ 150,00" }
        ]
    }"#;

    #[test]
    fn resolves_full_map_as_json() {
        let out = resolve_saved_response(RESPONSE, None, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["Vencimento"], "10/05/2024");
    }

    #[test]
    fn resolves_single_field_as_text() {
        let out = resolve_saved_response(RESPONSE, Some("Vencimento"), false).unwrap();
        assert_eq!(out, "10/05/2024");
    }

    #[test]
    fn unknown_field_fails() {
        let err = resolve_saved_response(RESPONSE, Some("Sacado"), false).unwrap_err();
        assert!(err.to_string().contains("invalid field"));
    }

    #[test]
    fn resolves_lines() {
        let out = resolve_saved_response(RESPONSE, None, true).unwrap();
        assert_eq!(out, "Vencimento 10/05/2024\nValor R$ 150,00");
    }

    #[test]
    fn rejects_non_json() {
        assert!(resolve_saved_response("not json", None, false).is_err());
    }
}
