use std::ops::Mul;
use std::str::FromStr;

//
// Vec3
//

/// A three component attribute value, used for both positions and normals.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct V3(pub f64, pub f64, pub f64); // x, y, z

impl V3 {
    pub const ZERO: V3 = V3(0.0, 0.0, 0.0);
    pub const ONE: V3  = V3(1.0, 1.0, 1.0);

    pub fn x(&self) -> f64 {
        self.0
    }

    pub fn y(&self) -> f64 {
        self.1
    }

    pub fn z(&self) -> f64 {
        self.2
    }

    pub fn xyz(&self) -> [f64; 3] {
        [self.0, self.1, self.2]
    }

    /// Multiplies all three components by {factor} in place.
    pub fn scale(&mut self, factor: f64) {
        self.0 *= factor;
        self.1 *= factor;
        self.2 *= factor;
    }
}

impl Mul<f64> for V3 {
    type Output = V3;
    fn mul(self, f: f64) -> V3 {
        V3(self.0 * f,
           self.1 * f,
           self.2 * f)
    }
}

impl Default for V3 {
    fn default() -> V3 {
        V3::ZERO
    }
}

impl From<[f64; 3]> for V3 {
    fn from([x, y, z]: [f64; 3]) -> V3 {
        V3(x, y, z)
    }
}

//
// Color
//

/// RGB channels. The parsers do not constrain the range.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color(pub f64, pub f64, pub f64); // r, g, b

impl Color {
    pub const BLACK: Color = Color(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color(1.0, 1.0, 1.0);

    pub fn r(&self) -> f64 {
        self.0
    }

    pub fn g(&self) -> f64 {
        self.1
    }

    pub fn b(&self) -> f64 {
        self.2
    }
}

impl From<[f64; 3]> for Color {
    fn from([r, g, b]: [f64; 3]) -> Color {
        Color(r, g, b)
    }
}

//
// Parsing helpers
//

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ElementsError {
    #[error("expected {expected} values, found {found}")]
    UnexpectedCount { expected: usize, found: usize },
    #[error("invalid value `{0}`")]
    InvalidValue(String),
}

/// Parses exactly N whitespace separated values.
pub fn parse_elements<T, const N: usize>(line: &str) -> Result<[T; N], ElementsError>
    where T: FromStr, T: Default, T: Copy
{
    let mut values = [Default::default(); N];
    let mut found = 0;
    for part in line.split_whitespace() {
        if found < N {
            values[found] = part.parse().map_err(|_| ElementsError::InvalidValue(part.to_string()))?;
        }
        found += 1;
    }
    if found != N {
        return Err(ElementsError::UnexpectedCount { expected: N, found });
    }
    Ok(values)
}

#[cfg(test)]
mod test_types {
    use super::*;

    #[test]
    fn scale_multiplies_every_component() {
        let mut v = V3(1.0, -2.0, 0.5);
        v.scale(4.0);
        assert_eq!(v, V3(4.0, -8.0, 2.0));
    }

    #[test]
    fn parse_three_floats() {
        let [x, y, z]: [f64; 3] = parse_elements("1.5  -2\t3e2").unwrap();
        assert_eq!((x, y, z), (1.5, -2.0, 300.0));
    }

    #[test]
    fn parse_too_few() {
        let err = parse_elements::<f64, 3>("1 2").unwrap_err();
        assert_eq!(err, ElementsError::UnexpectedCount { expected: 3, found: 2 });
    }

    #[test]
    fn parse_too_many() {
        let err = parse_elements::<f64, 3>("1 2 3 4").unwrap_err();
        assert_eq!(err, ElementsError::UnexpectedCount { expected: 3, found: 4 });
    }

    #[test]
    fn parse_garbage() {
        let err = parse_elements::<f64, 3>("1 two 3").unwrap_err();
        assert_eq!(err, ElementsError::InvalidValue("two".to_string()));
    }
}
