pub mod bbox;
pub mod grid;

pub use bbox::BoundingBox;
pub use grid::ModuleGrid;
