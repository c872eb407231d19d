use std::collections::HashMap;
use std::io::Read;

use asset_impl::types::{ parse_elements, Color };
use log::warn;

use crate::format::{ read_lines, split_directive, MtlDirective };
use crate::ObjError;

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: Option<String>,
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
}

impl Material {
    /// A named material with the default colors.
    pub fn named(name: impl Into<String>) -> Material {
        Material { name: Some(name.into()), ..Material::default() }
    }
}

impl Default for Material {
    fn default() -> Material {
        Material {
            name: None,
            ambient: Color::BLACK,
            diffuse: Color::WHITE,
            specular: Color::BLACK,
        }
    }
}

/// Materials by name. Lookups never fail: unknown names resolve to the
/// nameless default material.
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    materials: HashMap<String, Material>,
    default: Material,
}

impl MaterialTable {
    /// Parses a material library, or returns the default-only table when
    /// there is no library to read.
    pub fn parse(source: Option<&mut dyn Read>) -> Result<MaterialTable, ObjError> {
        match source {
            Some(source) => parse_mtl_file(source),
            None => Ok(MaterialTable::default()),
        }
    }

    pub fn lookup(&self, name: Option<&str>) -> &Material {
        name.and_then(|name| self.materials.get(name))
            .unwrap_or(&self.default)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.materials.contains_key(name)
    }

    pub fn default_material(&self) -> &Material {
        &self.default
    }

    /// Adds a named material, replacing any earlier one of the same name.
    pub fn insert(&mut self, material: Material) {
        match material.name.clone() {
            Some(name) => { self.materials.insert(name, material); },
            None => self.default = material,
        }
    }

    /// Number of named materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

pub fn parse_mtl_file(source: &mut dyn Read) -> Result<MaterialTable, ObjError> {

    let mut table = MaterialTable::default();

    // Supports newmtl, Ka, Kd & Ks directives only.
    let mut current: Option<Material> = None;

    for (line_no, line) in read_lines(source).enumerate() {
        let line = line?;
        let line_no = line_no + 1;
        let Some((keyword, rest)) = split_directive(&line) else {
            continue;
        };
        let directive = MtlDirective::from_keyword(keyword);
        let malformed = |reason: String| ObjError::Malformed { line: line_no, directive: directive.keyword(), reason };
        match directive {
            MtlDirective::NewMaterial => {
                if rest.is_empty() {
                    return Err(malformed("expected a material name".to_string()));
                }
                if let Some(done) = current.take() {
                    table.insert(done);
                }
                current = Some(Material::named(rest));
            },
            MtlDirective::Ambient | MtlDirective::Diffuse | MtlDirective::Specular => {
                let color = parse_elements::<f64, 3>(rest)
                    .map(Color::from)
                    .map_err(|e| malformed(e.to_string()))?;
                let Some(material) = current.as_mut() else {
                    warn!("line {line_no}: `{keyword}` before any `newmtl`, ignored");
                    continue;
                };
                match directive {
                    MtlDirective::Ambient  => material.ambient = color,
                    MtlDirective::Diffuse  => material.diffuse = color,
                    _                      => material.specular = color,
                }
            },
            MtlDirective::Ignored => {},
        }
    }

    // Emit the last material
    if let Some(done) = current {
        table.insert(done);
    }

    Ok(table)
}

#[cfg(test)]
mod test_material {
    use super::*;

    const LIBRARY: &str = "\
# Two materials
newmtl Steel
Ka 0.1 0.1 0.1
Kd 0.5 0.5 0.6
Ks 0.9 0.9 0.9
Ns 250.0
illum 2

newmtl Paint
Kd 1 0 0
map_Kd paint.png
";

    #[test]
    fn default_material_colors() {
        let m = Material::default();
        assert_eq!(m.name, None);
        assert_eq!(m.ambient, Color::BLACK);
        assert_eq!(m.diffuse, Color::WHITE);
        assert_eq!(m.specular, Color::BLACK);
    }

    #[test]
    fn no_source_gives_default_only() {
        let table = MaterialTable::parse(None).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.lookup(Some("Steel")), &Material::default());
        assert_eq!(table.lookup(None), &Material::default());
    }

    #[test]
    fn channels_map_by_keyword() {
        let table = parse_mtl_file(&mut LIBRARY.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);

        let steel = table.lookup(Some("Steel"));
        assert_eq!(steel.name.as_deref(), Some("Steel"));
        assert_eq!(steel.ambient, Color(0.1, 0.1, 0.1));
        assert_eq!(steel.diffuse, Color(0.5, 0.5, 0.6));
        assert_eq!(steel.specular, Color(0.9, 0.9, 0.9));

        let paint = table.lookup(Some("Paint"));
        assert_eq!(paint.ambient, Color::BLACK);
        assert_eq!(paint.diffuse, Color(1.0, 0.0, 0.0));
        assert_eq!(paint.specular, Color::BLACK);
    }

    #[test]
    fn unknown_name_falls_back_to_default() {
        let table = parse_mtl_file(&mut LIBRARY.as_bytes()).unwrap();
        assert_eq!(table.lookup(Some("Unknown")), &Material::default());
        assert!(!table.contains("Unknown"));
    }

    #[test]
    fn unknown_directives_are_ignored() {
        let src = "foo bar\nnewmtl A\nTf 1 1 1\nd 0.5\nbump x.png\n";
        let table = parse_mtl_file(&mut src.as_bytes()).unwrap();
        assert!(table.contains("A"));
    }

    #[test]
    fn non_utf8_comment_is_skipped() {
        let src: &[u8] = b"# r\xe9glage\nnewmtl A\nKd 1 0 0\n";
        let table = parse_mtl_file(&mut &src[..]).unwrap();
        assert_eq!(table.lookup(Some("A")).diffuse, Color(1.0, 0.0, 0.0));
    }

    #[test]
    fn redefinition_replaces() {
        let src = "newmtl A\nKd 1 0 0\nnewmtl A\nKd 0 1 0\n";
        let table = parse_mtl_file(&mut src.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup(Some("A")).diffuse, Color(0.0, 1.0, 0.0));
    }

    #[test]
    fn color_before_newmtl_is_ignored() {
        let src = "Kd 0 0 0\nnewmtl A\n";
        let table = parse_mtl_file(&mut src.as_bytes()).unwrap();
        assert_eq!(table.default_material(), &Material::default());
        assert_eq!(table.lookup(Some("A")).diffuse, Color::WHITE);
    }

    #[test]
    fn malformed_color_is_an_error() {
        let src = "newmtl A\nKd 1 0\n";
        match parse_mtl_file(&mut src.as_bytes()) {
            Err(ObjError::Malformed { line: 2, directive: "Kd", .. }) => {},
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
