//! Semantic reconstruction and manufacturer comparison for multi-layer
//! construction details.
//!
//! A detail here is not a drawing: it is a [`detail::SemanticDetail`]
//! describing the physical plies of an assembly, how they relate, and
//! which manufacturer products are currently bound to them. From that
//! one record the crate rebuilds presentation-ready 3D geometry
//! ([`geometry::reconstruct`]), swaps the whole assembly to another
//! manufacturer's catalog ([`equivalency::switch_manufacturer`]),
//! reports what a swap between two manufacturers would change
//! ([`comparison::difference_report`]), and flags chemically risky
//! layer contacts ([`compatibility::analyze_detail`]).
//!
//! The shipped knowledge bases (canonical materials, product
//! equivalencies, chemistry pair rules) are embedded TOML under
//! `config/`; all of them accept registrations at runtime.

pub mod comparison;
pub mod compatibility;
pub mod detail;
pub mod equivalency;
pub mod error;
pub mod geometry;
pub mod io;
pub mod material;
pub mod resolver;

pub use comparison::{difference_report, DifferenceReport};
pub use compatibility::{analyze_detail, CompatibilityMatrix, DetailAnalysis};
pub use detail::{validate_detail, SemanticDetail};
pub use equivalency::{switch_manufacturer, EquivalencyDatabase};
pub use error::DetailError;
pub use geometry::{reconstruct, ReconstructedDetail};
pub use material::MaterialCatalog;
pub use resolver::resolve_material_type;
