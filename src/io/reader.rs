//! Detail document reading: single files, wrapper documents, archives,
//! and directory scans.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::detail::SemanticDetail;
use crate::equivalency::{EquivalencyConfig, EquivalencyDatabase};
use crate::error::DetailError;
use crate::material::{MaterialCatalog, MaterialsConfig};

use super::writer::{CatalogExport, EquivalencyExport};

/// Parse a detail document from JSON text.
///
/// Two shapes are accepted: a bare detail object, and a wrapper object
/// carrying a `materials` array of details. Both come back as a list so
/// callers never branch on the shape.
pub fn parse_document(content: &str) -> Result<Vec<SemanticDetail>, DetailError> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if let Some(list) = value.get("materials").and_then(|m| m.as_array()) {
        let mut details = Vec::with_capacity(list.len());
        for item in list {
            details.push(serde_json::from_value(item.clone())?);
        }
        return Ok(details);
    }
    Ok(vec![serde_json::from_value(value)?])
}

/// Read one detail from a JSON file.
///
/// The file may use either document shape, but must hold exactly one
/// detail; a bundle belongs to [`read_details`].
pub fn read_detail(path: &Path) -> Result<SemanticDetail, DetailError> {
    let mut details = read_details(path)?;
    if details.len() != 1 {
        return Err(DetailError::Document(format!(
            "{} holds {} details, expected exactly one",
            path.display(),
            details.len()
        )));
    }
    Ok(details.remove(0))
}

/// Read every detail from a JSON file, in document order.
pub fn read_details(path: &Path) -> Result<Vec<SemanticDetail>, DetailError> {
    let content = std::fs::read_to_string(path)?;
    let details = parse_document(&content)?;
    debug!(path = %path.display(), details = details.len(), "read detail document");
    Ok(details)
}

/// Read every detail document bundled in a ZIP archive.
///
/// Only `.json` entries are parsed. Directories, other file types, and
/// OS metadata (`__MACOSX` trees, `.DS_Store`, AppleDouble `._` files)
/// are ignored silently, as are JSON entries that do not parse as detail
/// documents; a bundle from someone's desktop should import cleanly
/// without hand-pruning.
pub fn read_archive(path: &Path) -> Result<Vec<SemanticDetail>, DetailError> {
    let file = File::open(path)?;
    let details = read_archive_from(BufReader::new(file))?;
    info!(path = %path.display(), details = details.len(), "read detail archive");
    Ok(details)
}

/// Read detail documents from an already-open ZIP archive.
pub fn read_archive_from<R: Read + Seek>(reader: R) -> Result<Vec<SemanticDetail>, DetailError> {
    let mut archive = ZipArchive::new(reader)?;
    let mut details = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        if !is_document_entry(&name) {
            debug!(entry = %name, "skipping non-document archive entry");
            continue;
        }
        let mut content = String::new();
        if entry.read_to_string(&mut content).is_err() {
            debug!(entry = %name, "skipping unreadable archive entry");
            continue;
        }
        match parse_document(&content) {
            Ok(parsed) => details.extend(parsed),
            Err(err) => {
                debug!(entry = %name, error = %err, "skipping unparseable archive entry");
            }
        }
    }

    Ok(details)
}

/// Whether an archive entry name looks like a detail document.
fn is_document_entry(name: &str) -> bool {
    if name.split('/').any(|part| part == "__MACOSX") {
        return false;
    }
    let file_name = name.rsplit('/').next().unwrap_or(name);
    if file_name == ".DS_Store" || file_name.starts_with("._") {
        return false;
    }
    Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load a material catalog from a JSON export.
pub fn import_catalog(path: &Path) -> Result<MaterialCatalog, DetailError> {
    let content = std::fs::read_to_string(path)?;
    let export: CatalogExport = serde_json::from_str(&content)?;
    info!(
        path = %path.display(),
        materials = export.materials.len(),
        exported_at = %export.exported_at,
        "imported material catalog"
    );
    Ok(MaterialCatalog::new(MaterialsConfig {
        materials: export.materials,
    }))
}

/// Load an equivalency database from a JSON export.
pub fn import_equivalency(path: &Path) -> Result<EquivalencyDatabase, DetailError> {
    let content = std::fs::read_to_string(path)?;
    let export: EquivalencyExport = serde_json::from_str(&content)?;
    info!(
        path = %path.display(),
        families = export.families.len(),
        exported_at = %export.exported_at,
        "imported equivalency database"
    );
    Ok(EquivalencyDatabase::new(EquivalencyConfig {
        families: export.families,
    }))
}

/// Collect every parseable detail under a directory, recursively.
///
/// Unreadable and unparseable files are skipped with a log line, never
/// an error. Results are sorted by detail id so repeated scans of the
/// same tree agree.
pub fn scan_directory(dir: &Path) -> Result<Vec<SemanticDetail>, DetailError> {
    let mut details = Vec::new();

    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        match read_details(path) {
            Ok(parsed) => details.extend(parsed),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unparseable detail file");
            }
        }
    }

    details.sort_by(|a, b| a.id.cmp(&b.id));
    info!(dir = %dir.display(), details = details.len(), "scanned detail directory");
    Ok(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn detail_json(id: &str) -> String {
        format!(
            r#"{{
                "id": "{id}",
                "category": "roofing",
                "layers": [
                    {{ "id": "membrane", "material": "tpo", "thickness_mm": 1.5 }}
                ]
            }}"#
        )
    }

    fn archive_with(entries: &[(&str, &str)]) -> Cursor<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, content) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn test_parse_bare_detail() {
        let details = parse_document(&detail_json("roof-edge")).unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].id, "roof-edge");
        assert_eq!(details[0].layers[0].thickness_mm, 1.5);
    }

    #[test]
    fn test_parse_wrapper_document() {
        let content = format!(
            r#"{{ "materials": [{}, {}] }}"#,
            detail_json("roof-edge"),
            detail_json("parapet")
        );
        let details = parse_document(&content).unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[1].id, "parapet");
    }

    #[test]
    fn test_parse_rejects_non_documents() {
        assert!(parse_document("not json at all").is_err());
        assert!(parse_document(r#"{ "unrelated": true }"#).is_err());
    }

    #[test]
    fn test_archive_reads_json_entries_only() {
        let cursor = archive_with(&[
            ("details/roof-edge.json", &detail_json("roof-edge")),
            ("details/readme.txt", "not a detail"),
            ("details/parapet.json", &detail_json("parapet")),
        ]);
        let details = read_archive_from(cursor).unwrap();
        let mut ids: Vec<&str> = details.iter().map(|d| d.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["parapet", "roof-edge"]);
    }

    #[test]
    fn test_archive_ignores_os_metadata() {
        let cursor = archive_with(&[
            ("__MACOSX/details/._roof-edge.json", "apple resource fork"),
            ("details/.DS_Store", "finder cruft"),
            ("details/._parapet.json", "apple double"),
            ("details/roof-edge.json", &detail_json("roof-edge")),
        ]);
        let details = read_archive_from(cursor).unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].id, "roof-edge");
    }

    #[test]
    fn test_archive_skips_broken_json_silently() {
        let cursor = archive_with(&[
            ("broken.json", "{ truncated"),
            ("good.json", &detail_json("roof-edge")),
        ]);
        let details = read_archive_from(cursor).unwrap();
        assert_eq!(details.len(), 1);
    }

    #[test]
    fn test_non_archive_bytes_error() {
        let cursor = Cursor::new(b"definitely not a zip".to_vec());
        assert!(matches!(
            read_archive_from(cursor),
            Err(DetailError::Archive(_))
        ));
    }

    #[test]
    fn test_entry_filter() {
        assert!(is_document_entry("details/roof-edge.json"));
        assert!(is_document_entry("ROOF.JSON"));
        assert!(!is_document_entry("details/roof-edge.pdf"));
        assert!(!is_document_entry("__MACOSX/details/roof-edge.json"));
        assert!(!is_document_entry("details/._roof-edge.json"));
        assert!(!is_document_entry(".DS_Store"));
    }
}
