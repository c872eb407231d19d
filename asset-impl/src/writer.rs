use std::fmt::Display;
use std::io::Write;

use log::debug;

use crate::geometry::{ Point, Triangle };

// Asset writer
//
// The asset format is plain text with two records per triangle corner:
//
//      n <x> <y> <z>
//      v <x> <y> <z>
//
// The normal record always precedes the vertex it belongs to. Floats are
// written in fixed point with six decimals so output is stable across runs.

/// What was written, for diagnostic display.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ExportSummary {
    pub scale: f64,
    pub triangle_count: usize,
}

/// Six decimal fixed point; non-finite values print as `nan`, `inf`, `-inf`.
pub struct Fixed(pub f64);

impl Display for Fixed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            x if x.is_nan() => f.write_str("nan"),
            x if x.is_infinite() && x > 0.0 => f.write_str("inf"),
            x if x.is_infinite() => f.write_str("-inf"),
            x => write!(f, "{x:.6}"),
        }
    }
}

pub fn write_point(dst: &mut dyn Write, point: &Point) -> std::io::Result<()> {
    let n = point.norm;
    let v = point.vert;
    writeln!(dst, "n {} {} {}", Fixed(n.0), Fixed(n.1), Fixed(n.2))?;
    writeln!(dst, "v {} {} {}", Fixed(v.0), Fixed(v.1), Fixed(v.2))?;
    Ok(())
}

/// Serializes {triangles} in order. {scale} is the factor the positions
/// were already scaled by; it is only reported back.
pub fn export(triangles: &[Triangle], scale: f64, dst: &mut dyn Write) -> std::io::Result<ExportSummary> {
    for tri in triangles {
        for point in tri.points().iter() {
            write_point(dst, point)?;
        }
    }
    dst.flush()?;
    debug!("Wrote {} triangles ({} records)", triangles.len(), triangles.len() * 6);
    Ok(ExportSummary { scale, triangle_count: triangles.len() })
}

#[cfg(test)]
mod test_writer {
    use super::*;
    use crate::types::V3;

    #[test]
    fn writes_normal_then_vertex_per_corner() {
        let verts = [V3(0.0, 0.0, 0.0), V3(1.0, 0.0, 0.0), V3(0.0, 1.0, 0.0)];
        let norm = V3(0.0, 0.0, 1.0);
        let tri = Triangle::new(
            Point::new(&verts[0], &norm),
            Point::new(&verts[1], &norm),
            Point::new(&verts[2], &norm),
        );

        let mut out = Vec::new();
        let summary = export(&[tri], 2.0, &mut out).unwrap();
        assert_eq!(summary, ExportSummary { scale: 2.0, triangle_count: 1 });

        let text = String::from_utf8(out).unwrap();
        let expected = "\
n 0.000000 0.000000 1.000000
v 0.000000 0.000000 0.000000
n 0.000000 0.000000 1.000000
v 1.000000 0.000000 0.000000
n 0.000000 0.000000 1.000000
v 0.000000 1.000000 0.000000
";
        assert_eq!(text, expected);
    }

    #[test]
    fn six_decimal_rounding() {
        let vert = V3(1.23456789, -0.0000004, 1e7);
        let norm = V3(-0.5, 0.1234564, 2.0 / 3.0);
        let mut out = Vec::new();
        write_point(&mut out, &Point::new(&vert, &norm)).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("n -0.500000 0.123456 0.666667"));
        assert_eq!(lines.next(), Some("v 1.234568 -0.000000 10000000.000000"));
    }

    #[test]
    fn non_finite_values_are_lowercase() {
        let vert = V3(0.0078125, f64::NAN, -0.0);
        let norm = V3(f64::INFINITY, f64::NEG_INFINITY, -f64::NAN);
        let mut out = Vec::new();
        write_point(&mut out, &Point::new(&vert, &norm)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "n inf -inf nan\nv 0.007812 nan -0.000000\n");
    }

    #[test]
    fn empty_list_writes_nothing() {
        let mut out = Vec::new();
        let summary = export(&[], 1.0, &mut out).unwrap();
        assert_eq!(summary.triangle_count, 0);
        assert!(out.is_empty());
    }
}
