//! YAML file loaders for the level table and the achievement catalog.
//!
//! Both files are read once at startup; the resulting values are immutable.

mod catalog_file;
mod level_table_file;

pub use catalog_file::YamlCatalogSource;
pub use level_table_file::load_level_table;
