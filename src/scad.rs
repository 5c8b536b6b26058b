//! OpenSCAD script generation from a module grid.
//!
//! The emitted script defines a unit-cube macro, an aggregate macro placing
//! one cube per dark module, and a size constant. The result can be carved
//! out of a flat surface with `difference()` for printing.

use std::fmt::Write;

use crate::models::ModuleGrid;

/// Tunable parameters for the emitted geometry.
#[derive(Debug, Clone, Copy)]
pub struct ScadSettings {
    /// Center-to-center spacing of adjacent blocks, in scene units.
    pub block_size: f64,
    /// Gap subtracted from each block's footprint. Blocks that touch
    /// exactly at their faces produce a non-manifold mesh on STL export.
    pub block_padding: f64,
    /// Append a `qr_code();` invocation so the script renders on its own.
    pub render: bool,
}

impl ScadSettings {
    /// Actual footprint side length of one block.
    pub fn block_side(&self) -> f64 {
        self.block_size - self.block_padding
    }
}

impl Default for ScadSettings {
    fn default() -> Self {
        Self {
            block_size: 1.0,
            block_padding: 0.01,
            render: false,
        }
    }
}

/// Emit the OpenSCAD script for a module grid.
///
/// Grid row 0 maps to the top edge: image rows grow downward while OpenSCAD
/// y grows upward, hence the sign flip on y. The whole pattern is centered
/// on the origin.
pub fn generate_scad(grid: &ModuleGrid, settings: &ScadSettings) -> String {
    let side = grid.side();
    let half = side as f64 / 2.0;
    let block_side = settings.block_side();

    let mut out = String::new();
    out.push_str("module _qr_code_dot() {\n");
    let _ = writeln!(out, "    cube([{block_side}, {block_side}, 1]);");
    out.push_str("}\n");

    out.push_str("module qr_code() {\n");
    for (row, col) in grid.dark_modules() {
        let x = settings.block_size * col as f64 - half;
        let y = -settings.block_size * row as f64 + half;
        let _ = writeln!(out, "    translate([{x}, {y}, 0]) _qr_code_dot();");
    }
    out.push_str("}\n");

    let _ = write!(out, "qr_code_size = {side};");
    if settings.render {
        out.push_str("\nqr_code();");
    }
    out
}
