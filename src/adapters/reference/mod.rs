//! Reference data adapters implementing `ReferenceDataSource`.

mod builtin;
mod yaml_file;

pub use builtin::BuiltinReferenceSource;
pub use yaml_file::YamlFileReferenceSource;
