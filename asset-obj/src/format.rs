use std::fmt;
use std::io::{ BufRead, BufReader, Read };

// Line level OBJ/MTL syntax
//
// Both formats are line oriented: `<keyword> <arguments...>`. Blank lines
// and lines starting with `#` carry nothing. Keywords are mapped to a
// directive kind through a small table, unknown keywords map to `Ignored`.
//
// See: https://en.wikipedia.org/wiki/Wavefront_.obj_file

/// Lines of {source}, decoded lossily: stray non-UTF-8 bytes (usually in
/// comments or object names) become U+FFFD instead of failing the read.
pub fn read_lines(source: &mut dyn Read) -> impl Iterator<Item = std::io::Result<String>> + '_ {
    BufReader::new(source)
        .split(b'\n')
        .map(|line| line.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
}

/// Splits a line into its keyword and the (trimmed) remainder.
/// Returns None for blank and comment lines.
pub fn split_directive(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => Some((keyword, rest.trim())),
        None => Some((line, "")),
    }
}

fn lookup<T: Copy>(table: &[(&'static str, T)], keyword: &str, fallback: T) -> T {
    table.iter()
        .find(|(k, _)| *k == keyword)
        .map(|(_, d)| *d)
        .unwrap_or(fallback)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ObjDirective {
    Vertex,
    Normal,
    Face,
    MaterialLibrary,
    UseMaterial,
    Ignored,
}

const OBJ_DIRECTIVES: &[(&str, ObjDirective)] = &[
    ("v",      ObjDirective::Vertex),
    ("vn",     ObjDirective::Normal),
    ("f",      ObjDirective::Face),
    ("mtllib", ObjDirective::MaterialLibrary),
    ("usemtl", ObjDirective::UseMaterial),
];

impl ObjDirective {
    pub fn from_keyword(keyword: &str) -> ObjDirective {
        lookup(OBJ_DIRECTIVES, keyword, ObjDirective::Ignored)
    }

    pub fn keyword(self) -> &'static str {
        OBJ_DIRECTIVES.iter()
            .find(|(_, d)| *d == self)
            .map_or("?", |(k, _)| *k)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MtlDirective {
    NewMaterial,
    Ambient,
    Diffuse,
    Specular,
    Ignored,
}

const MTL_DIRECTIVES: &[(&str, MtlDirective)] = &[
    ("newmtl", MtlDirective::NewMaterial),
    ("Ka",     MtlDirective::Ambient),
    ("Kd",     MtlDirective::Diffuse),
    ("Ks",     MtlDirective::Specular),
];

impl MtlDirective {
    pub fn from_keyword(keyword: &str) -> MtlDirective {
        lookup(MTL_DIRECTIVES, keyword, MtlDirective::Ignored)
    }

    pub fn keyword(self) -> &'static str {
        MTL_DIRECTIVES.iter()
            .find(|(_, d)| *d == self)
            .map_or("?", |(k, _)| *k)
    }
}

/// The three index slots of a face corner.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Attribute {
    Vertex,
    TexCoord,
    Normal,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Attribute::Vertex   => "vertex",
            Attribute::TexCoord => "texture coordinate",
            Attribute::Normal   => "normal",
        })
    }
}

/// One corner of a face as written in the file: `v`, `v/t`, `v//n` or `v/t/n`.
/// Indices are kept raw (1-based, or negative for relative references).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct FaceCorner {
    pub slots: [Option<i64>; 3],
}

impl FaceCorner {
    pub fn vertex(&self) -> Option<i64> {
        self.slots[0]
    }

    pub fn texcoord(&self) -> Option<i64> {
        self.slots[1]
    }

    pub fn normal(&self) -> Option<i64> {
        self.slots[2]
    }

    /// The vertex and normal indices, or the first of them that is absent.
    pub fn required(&self) -> Result<(i64, i64), Attribute> {
        match (self.vertex(), self.normal()) {
            (Some(v), Some(n)) => Ok((v, n)),
            (None, _) => Err(Attribute::Vertex),
            (Some(_), None) => Err(Attribute::Normal),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CornerParseError {
    #[error("face vertex `{0}`: unexpected number of parts")]
    UnexpectedPartCount(String),
    #[error("face vertex `{0}`: invalid integer")]
    ParseIntError(String, #[source] std::num::ParseIntError),
}

impl std::str::FromStr for FaceCorner {
    type Err = CornerParseError;
    fn from_str(s: &str) -> Result<Self, CornerParseError> {
        let mut corner = FaceCorner::default();
        let mut parts = s.split('/');
        for slot in corner.slots.iter_mut() {
            *slot = match parts.next() {
                None => None,
                Some("") => None,
                Some(v) => Some(v.parse().map_err(|e| CornerParseError::ParseIntError(s.to_string(), e))?),
            };
        }
        if parts.next().is_some() {
            return Err(CornerParseError::UnexpectedPartCount(s.to_string()));
        }
        Ok(corner)
    }
}

/// Converts a raw OBJ index into a 0-based index into an array of
/// {available} entries. Positive indices count from 1, negative indices
/// count back from the most recent entry.
pub fn resolve_index(raw: i64, available: usize) -> Option<usize> {
    let magnitude = usize::try_from(raw.unsigned_abs()).ok()?;
    if magnitude == 0 || magnitude > available {
        None
    } else if raw > 0 {
        Some(magnitude - 1)
    } else {
        Some(available - magnitude)
    }
}
