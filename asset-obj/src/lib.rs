mod format;
mod material;
mod loader;
mod document;

use std::path::PathBuf;

pub use format::{ Attribute, FaceCorner, ObjDirective, MtlDirective };
pub use material::{ Material, MaterialTable, parse_mtl_file };
pub use loader::{ MaterialLoader, FileMaterialLoader, NoMaterials };
pub use document::{ ObjDocument, FaceRecord, ResolvedCorner, split_face };

#[derive(thiserror::Error, Debug)]
pub enum ObjError {
    #[error("IO Error")]
    IoError(#[from] std::io::Error),
    #[error("line {line}: malformed `{directive}` directive: {reason}")]
    Malformed { line: usize, directive: &'static str, reason: String },
    #[error("line {line}: face vertex {corner}: missing {attribute}s")]
    MissingAttribute { line: usize, corner: usize, attribute: Attribute },
    #[error("line {line}: cannot deal with a polygon of {corners} vertices")]
    PolygonArity { line: usize, corners: usize },
    #[error("line {line}: {attribute} index {index} out of range ({available} defined so far)")]
    IndexOutOfRange { line: usize, attribute: Attribute, index: i64, available: usize },
    #[error("material library {} not found", .0.display())]
    MaterialFileNotFound(PathBuf),
    #[error("unable to open material library {}", path.display())]
    MaterialFileOpen { path: PathBuf, #[source] source: std::io::Error },
    #[error("error in material library {}", path.display())]
    MaterialLibrary { path: PathBuf, #[source] source: Box<ObjError> },
}
