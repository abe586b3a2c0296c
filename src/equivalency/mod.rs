pub mod database;
pub mod substitution;
pub mod types;

pub use database::{default_equivalency, load_equivalency, EquivalencyDatabase, EquivalentProduct};
pub use substitution::{switch_manufacturer, ProductSwap, SubstitutionOutcome};
pub use types::{EquivalencyConfig, EquivalencyEntry, MaterialFamily};
