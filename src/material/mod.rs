pub mod catalog;
pub mod types;

pub use catalog::{default_materials, load_materials, MaterialCatalog};
pub use types::{MaterialDna, MaterialsConfig};
