//! Atomic export of detail documents and catalog snapshots.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::info;

use crate::detail::SemanticDetail;
use crate::equivalency::{EquivalencyDatabase, MaterialFamily};
use crate::error::DetailError;
use crate::material::{MaterialCatalog, MaterialDna};

/// Write a string to a file atomically.
///
/// The content goes to a temporary file in the target's directory, then an
/// atomic rename replaces the target. An interrupted write never leaves a
/// partial file behind. Missing parent directories are created; a bare file
/// name writes to the current directory.
fn write_atomic(content: &str, target: &Path) -> Result<(), DetailError> {
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    // Temp file in the same directory so the rename stays on one filesystem.
    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(content.as_bytes())?;
    temp.flush()?;
    temp.persist(target).map_err(|e| DetailError::Io(e.error))?;
    Ok(())
}

/// Write one detail as a bare JSON document, atomically.
pub fn write_detail_atomic(detail: &SemanticDetail, target: &Path) -> Result<(), DetailError> {
    let json = serde_json::to_string_pretty(detail)?;
    write_atomic(&json, target)?;
    info!(path = %target.display(), detail = %detail.id, "wrote detail document");
    Ok(())
}

/// Write a set of details as one wrapper document, atomically.
pub fn write_document_atomic(details: &[SemanticDetail], target: &Path) -> Result<(), DetailError> {
    let document = serde_json::json!({ "materials": details });
    let json = serde_json::to_string_pretty(&document)?;
    write_atomic(&json, target)?;
    info!(path = %target.display(), details = details.len(), "wrote detail bundle");
    Ok(())
}

/// Serialized snapshot of a material catalog.
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogExport {
    /// When the snapshot was taken.
    pub exported_at: DateTime<Utc>,
    /// Material records keyed by canonical type tag.
    pub materials: HashMap<String, MaterialDna>,
}

/// Export the material catalog as timestamped JSON, atomically.
pub fn export_catalog(catalog: &MaterialCatalog, target: &Path) -> Result<(), DetailError> {
    let export = CatalogExport {
        exported_at: Utc::now(),
        materials: catalog.to_config().materials,
    };
    let json = serde_json::to_string_pretty(&export)?;
    write_atomic(&json, target)?;
    info!(path = %target.display(), materials = export.materials.len(), "exported material catalog");
    Ok(())
}

/// Serialized snapshot of an equivalency database.
#[derive(Debug, Serialize, Deserialize)]
pub struct EquivalencyExport {
    /// When the snapshot was taken.
    pub exported_at: DateTime<Utc>,
    /// Product families, in database order.
    pub families: Vec<MaterialFamily>,
}

/// Export the equivalency database as timestamped JSON, atomically.
pub fn export_equivalency(
    database: &EquivalencyDatabase,
    target: &Path,
) -> Result<(), DetailError> {
    let export = EquivalencyExport {
        exported_at: Utc::now(),
        families: database.to_config().families,
    };
    let json = serde_json::to_string_pretty(&export)?;
    write_atomic(&json, target)?;
    info!(path = %target.display(), families = export.families.len(), "exported equivalency database");
    Ok(())
}
