//! Local reading of downloaded ZIP packages.

pub mod reader;

pub use reader::{parse_metadata, CfdiDocument, MetadataItem, PackageReader};
