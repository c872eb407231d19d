use std::io::ErrorKind;
use std::path::{ Path, PathBuf };

use log::debug;

use crate::material::{ parse_mtl_file, MaterialTable };
use crate::ObjError;

/// Resolves the argument of an `mtllib` directive into a material table.
///
/// A library that does not exist is reported as `ObjError::MaterialFileNotFound`
/// so the caller can downgrade it; every other failure is fatal.
pub trait MaterialLoader {
    fn load(&self, name: &str) -> Result<MaterialTable, ObjError>;
}

/// Loads material libraries relative to the directory of the OBJ file.
pub struct FileMaterialLoader {
    base_dir: PathBuf,
}

impl FileMaterialLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> FileMaterialLoader {
        FileMaterialLoader { base_dir: base_dir.into() }
    }

    /// A loader for the directory containing {obj_path}.
    pub fn for_obj_file(obj_path: &Path) -> FileMaterialLoader {
        let base_dir = obj_path.parent().unwrap_or(Path::new(""));
        FileMaterialLoader::new(base_dir)
    }

    pub fn resolve(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }
}

impl MaterialLoader for FileMaterialLoader {
    fn load(&self, name: &str) -> Result<MaterialTable, ObjError> {
        let path = self.resolve(name);
        let mut file = match std::fs::File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(ObjError::MaterialFileNotFound(path));
            },
            Err(source) => {
                return Err(ObjError::MaterialFileOpen { path, source });
            },
        };
        let table = parse_mtl_file(&mut file)
            .map_err(|source| ObjError::MaterialLibrary { path: path.clone(), source: Box::new(source) })?;
        debug!("Loaded {} materials from {}", table.len(), path.display());
        Ok(table)
    }
}

/// For documents without a location on disk: every library is missing.
pub struct NoMaterials;

impl MaterialLoader for NoMaterials {
    fn load(&self, name: &str) -> Result<MaterialTable, ObjError> {
        Err(ObjError::MaterialFileNotFound(PathBuf::from(name)))
    }
}
