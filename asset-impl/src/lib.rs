pub mod types;
pub mod geometry;
pub mod writer;
pub mod reader;

pub use self::types::*;
pub use self::geometry::*;
