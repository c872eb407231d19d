use std::io::Read;
use std::path::Path;

use arrayvec::ArrayVec;
use asset_impl::geometry::{ Point, Triangle };
use asset_impl::types::{ parse_elements, V3 };
use log::{ debug, warn };

use crate::format::{ read_lines, resolve_index, split_directive, Attribute, CornerParseError, FaceCorner, ObjDirective };
use crate::loader::{ FileMaterialLoader, MaterialLoader };
use crate::material::{ Material, MaterialTable };
use crate::ObjError;

// Obj parser
//
// Supports v, vn, f, mtllib & usemtl directives; everything else
// (vt, o, g, s, ...) is skipped. Assumptions:
// - every position and normal has three components
// - every face has three or four corners, each carrying a vertex and a
//   normal index (`v//n` or `v/t/n`)
// - faces only reference attributes declared earlier in the file
//
// Texture coordinate indices are kept on the face record but never resolved.

/// A face corner with its vertex and normal indices resolved to 0-based
/// positions in the document's attribute arrays.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ResolvedCorner {
    pub vertex: usize,
    pub texcoord: Option<i64>,
    pub normal: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaceRecord {
    /// Source line, for error reporting.
    pub line: usize,
    pub corners: Vec<ResolvedCorner>,
    /// The material active when the face was declared.
    pub material: Option<String>,
}

#[derive(Debug, Default)]
pub struct ObjDocument {
    vertices: Vec<V3>,
    normals: Vec<V3>,
    faces: Vec<FaceRecord>,
    materials: MaterialTable,
    active_material: Material,
    scale: f64,
}

/// Splits a polygon into triangles: a triangle is kept as is, a quad
/// (a, b, c, d) becomes (a, b, d) and (d, b, c). Any other corner count
/// yields None.
pub fn split_face<T: Copy>(corners: &[T]) -> Option<ArrayVec<[T; 3], 2>> {
    let mut tris = ArrayVec::new();
    match *corners {
        [a, b, c] => {
            tris.push([a, b, c]);
        },
        [a, b, c, d] => {
            tris.push([a, b, d]);
            tris.push([d, b, c]);
        },
        _ => return None,
    }
    Some(tris)
}

impl ObjDocument {
    /// Parses an OBJ stream. Positions are multiplied by {scale} as they are
    /// read, normals are kept as is. `mtllib` directives go through {loader}.
    pub fn parse(source: &mut dyn Read, loader: &dyn MaterialLoader, scale: f64) -> Result<ObjDocument, ObjError> {
        let mut state = ParseState {
            doc: ObjDocument { scale, ..ObjDocument::default() },
            loader,
        };

        for (line_no, line) in read_lines(source).enumerate() {
            let line = line?;
            let Some((keyword, rest)) = split_directive(&line) else {
                continue;
            };
            state.apply(line_no + 1, ObjDirective::from_keyword(keyword), rest)?;
        }

        let doc = state.doc;
        debug!("Parsed {} vertices, {} normals, {} faces",
            doc.vertices.len(), doc.normals.len(), doc.faces.len());
        Ok(doc)
    }

    /// Parses an OBJ stream whose material libraries live relative to {base_dir}.
    pub fn parse_with_base(source: &mut dyn Read, base_dir: &Path, scale: f64) -> Result<ObjDocument, ObjError> {
        Self::parse(source, &FileMaterialLoader::new(base_dir), scale)
    }

    pub fn vertices(&self) -> &[V3] {
        &self.vertices
    }

    pub fn normals(&self) -> &[V3] {
        &self.normals
    }

    pub fn faces(&self) -> &[FaceRecord] {
        &self.faces
    }

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The material selected by the last `usemtl`, resolved against the
    /// library loaded at that point, or the default material.
    pub fn active_material(&self) -> &Material {
        &self.active_material
    }

    /// Resolves every face into triangles, in face order.
    pub fn triangulate(&self) -> Result<Vec<Triangle<'_>>, ObjError> {
        let mut tris = Vec::with_capacity(self.faces.len());
        for face in self.faces.iter() {
            let split = split_face(face.corners.as_slice())
                .ok_or(ObjError::PolygonArity { line: face.line, corners: face.corners.len() })?;
            for [a, b, c] in split {
                tris.push(Triangle::new(
                    self.point(face.line, a)?,
                    self.point(face.line, b)?,
                    self.point(face.line, c)?,
                ));
            }
        }
        Ok(tris)
    }

    fn point(&self, line: usize, corner: ResolvedCorner) -> Result<Point<'_>, ObjError> {
        let vert = attribute_at(&self.vertices, Attribute::Vertex, corner.vertex, line)?;
        let norm = attribute_at(&self.normals, Attribute::Normal, corner.normal, line)?;
        Ok(Point::new(vert, norm))
    }
}

fn attribute_at(values: &[V3], attribute: Attribute, index: usize, line: usize) -> Result<&V3, ObjError> {
    values.get(index).ok_or_else(|| ObjError::IndexOutOfRange {
        line,
        attribute,
        index: i64::try_from(index).map_or(i64::MAX, |i| i + 1),
        available: values.len(),
    })
}

// Per-line state while a document is being built.
struct ParseState<'l> {
    doc: ObjDocument,
    loader: &'l dyn MaterialLoader,
}

impl ParseState<'_> {
    fn apply(&mut self, line: usize, directive: ObjDirective, rest: &str) -> Result<(), ObjError> {
        let malformed = |reason: String| ObjError::Malformed { line, directive: directive.keyword(), reason };
        match directive {
            // Vertex position
            ObjDirective::Vertex => {
                let mut vert = parse_elements::<f64, 3>(rest)
                    .map(V3::from)
                    .map_err(|e| malformed(e.to_string()))?;
                vert.scale(self.doc.scale);
                self.doc.vertices.push(vert);
            },
            // Vertex normal
            ObjDirective::Normal => {
                let norm = parse_elements::<f64, 3>(rest)
                    .map(V3::from)
                    .map_err(|e| malformed(e.to_string()))?;
                self.doc.normals.push(norm);
            },
            // Face
            ObjDirective::Face => {
                let corners = self.parse_face(line, rest)?;
                let material = self.doc.active_material.name.clone();
                self.doc.faces.push(FaceRecord { line, corners, material });
            },
            // Material library
            ObjDirective::MaterialLibrary => {
                if rest.is_empty() {
                    return Err(malformed("expected a file name".to_string()));
                }
                self.doc.materials = match self.loader.load(rest) {
                    Ok(table) => table,
                    Err(ObjError::MaterialFileNotFound(path)) => {
                        warn!("line {line}: material library {} not found, using the default material", path.display());
                        MaterialTable::default()
                    },
                    Err(err) => return Err(err),
                };
            },
            // Material selection
            ObjDirective::UseMaterial => {
                if rest.is_empty() {
                    return Err(malformed("expected a material name".to_string()));
                }
                if !self.doc.materials.contains(rest) {
                    warn!("line {line}: unknown material {rest}, using the default material");
                }
                self.doc.active_material = self.doc.materials.lookup(Some(rest)).clone();
            },
            ObjDirective::Ignored => {},
        }
        Ok(())
    }

    fn parse_face(&self, line: usize, rest: &str) -> Result<Vec<ResolvedCorner>, ObjError> {
        let available_vertices = self.doc.vertices.len();
        let available_normals = self.doc.normals.len();

        let mut corners = Vec::with_capacity(4);
        for (i, part) in rest.split_whitespace().enumerate() {
            let corner: FaceCorner = part.parse()
                .map_err(|e: CornerParseError| ObjError::Malformed {
                    line,
                    directive: ObjDirective::Face.keyword(),
                    reason: e.to_string(),
                })?;
            let (vertex, normal) = corner.required()
                .map_err(|attribute| ObjError::MissingAttribute { line, corner: i + 1, attribute })?;
            let resolve = |attribute, index, available| {
                resolve_index(index, available)
                    .ok_or(ObjError::IndexOutOfRange { line, attribute, index, available })
            };
            corners.push(ResolvedCorner {
                vertex: resolve(Attribute::Vertex, vertex, available_vertices)?,
                texcoord: corner.texcoord(),
                normal: resolve(Attribute::Normal, normal, available_normals)?,
            });
        }
        Ok(corners)
    }
}
