use crate::types::V3;

/// A resolved (position, normal) pair. Borrows from the attribute arrays
/// of the document it was resolved against.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point<'a> {
    pub vert: &'a V3,
    pub norm: &'a V3,
}

impl<'a> Point<'a> {
    pub fn new(vert: &'a V3, norm: &'a V3) -> Point<'a> {
        Point { vert, norm }
    }
}

/// Three points in source winding order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle<'a> {
    pub a: Point<'a>,
    pub b: Point<'a>,
    pub c: Point<'a>,
}

impl<'a> Triangle<'a> {
    pub fn new(a: Point<'a>, b: Point<'a>, c: Point<'a>) -> Triangle<'a> {
        Triangle { a, b, c }
    }

    /// The points in emission order (a, b, c).
    pub fn points(&self) -> [Point<'a>; 3] {
        [self.a, self.b, self.c]
    }
}
