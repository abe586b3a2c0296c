pub mod types;
pub mod validation;

pub use types::{
    AssemblyCategory, ConnectionKind, LayerVisual, PositionTier, ProductReference, ProfileShape,
    SemanticConnection, SemanticDetail, SemanticLayer, Viewport,
};
pub use validation::{validate_detail, ValidationIssue};
