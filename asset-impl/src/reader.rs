use std::io::{ BufRead, BufReader, Read };

use crate::types::{ parse_elements, V3 };

// Asset reader
//
// Reads the line format produced by `writer::export` the way the engine's
// asset packer consumes it: an `n` record sets the current normal and each
// `v` record emits one vertex carrying that normal.

#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("IO Error")]
    IoError(#[from] std::io::Error),
    #[error("line {line}: unknown record `{keyword}`")]
    UnknownRecord { line: usize, keyword: String },
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AssetVertex {
    pub vert: V3,
    pub norm: V3,
}

pub fn read_asset(source: &mut dyn Read) -> Result<Vec<AssetVertex>, AssetError> {
    let mut vertices = Vec::new();
    let mut norm = V3::ZERO;

    for (line_no, line) in BufReader::new(source).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        let line_no = line_no + 1;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let parse_v3 = |rest: &str| -> Result<V3, AssetError> {
            parse_elements::<f64, 3>(rest)
                .map(V3::from)
                .map_err(|e| AssetError::Parse { line: line_no, reason: e.to_string() })
        };
        match keyword {
            "n" => {
                norm = parse_v3(rest)?;
            },
            "v" => {
                let vert = parse_v3(rest)?;
                vertices.push(AssetVertex { vert, norm });
            },
            _ => {
                return Err(AssetError::UnknownRecord { line: line_no, keyword: keyword.to_string() });
            },
        }
    }

    Ok(vertices)
}

#[cfg(test)]
mod test_reader {
    use super::*;

    #[test]
    fn normal_carries_to_following_vertices() {
        let src = "n 0 0 1\nv 1 2 3\nv 4 5 6\n\n# comment\nn 1 0 0\nv 7 8 9\n";
        let verts = read_asset(&mut src.as_bytes()).unwrap();
        assert_eq!(verts, vec![
            AssetVertex { vert: V3(1.0, 2.0, 3.0), norm: V3(0.0, 0.0, 1.0) },
            AssetVertex { vert: V3(4.0, 5.0, 6.0), norm: V3(0.0, 0.0, 1.0) },
            AssetVertex { vert: V3(7.0, 8.0, 9.0), norm: V3(1.0, 0.0, 0.0) },
        ]);
    }

    #[test]
    fn unknown_record_is_rejected() {
        let src = "n 0 0 1\nf 1 2 3\n";
        match read_asset(&mut src.as_bytes()) {
            Err(AssetError::UnknownRecord { line: 2, keyword }) => assert_eq!(keyword, "f"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn short_record_is_rejected() {
        let src = "v 1 2\n";
        assert!(matches!(read_asset(&mut src.as_bytes()), Err(AssetError::Parse { line: 1, .. })));
    }
}
