pub mod catalog;
pub mod error;
pub mod model;

pub use catalog::{RobotCatalog, CATALOG_FILE_NAME, DEFAULT_INDEX};
pub use error::{CatalogError, CatalogResult};
pub use model::{CatalogEntry, CatalogFile, RobotSpec};
