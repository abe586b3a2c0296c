//! Detail document and catalog I/O.
//!
//! Reading accepts the three document shapes (bare detail, `materials`
//! wrapper, ZIP archive) plus recursive directory scans; writing is
//! always atomic via a temp-file rename. Catalog snapshots round-trip
//! through timestamped JSON exports.

pub mod reader;
pub mod writer;

pub use reader::{
    import_catalog, import_equivalency, parse_document, read_archive, read_archive_from,
    read_detail, read_details, scan_directory,
};
pub use writer::{
    export_catalog, export_equivalency, write_detail_atomic, write_document_atomic, CatalogExport,
    EquivalencyExport,
};
