//! Public surface extraction.
//!
//! A component's surface metadata (the JSON document a build emits next to
//! the compiled artifact) is loaded fresh for every case and rendered to a
//! deterministic, line-per-declaration text.

pub mod error;
pub mod extractor;
pub mod metadata;
pub mod render;

// Re-export commonly used types
pub use error::{LoadError, LoadResult};
pub use extractor::{Artifact, FnExtractor, MetadataExtractor, SurfaceExtractor};
pub use metadata::{
    ComponentMetadata, MemberKind, MemberMetadata, ModuleMetadata, TypeKind, TypeMetadata,
    Visibility, FORMAT_VERSION,
};
pub use render::render;
