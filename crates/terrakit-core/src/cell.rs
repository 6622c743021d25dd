//! Cell values and reserved sentinels.
//!
//! A cell value is an opaque 8-bit tag. Two values are reserved: [`DEFAULT`]
//! marks unknown terrain (and is the fallback for out-of-bounds reads on the
//! quadtree path), [`ERROR`] is returned by grid reads that fall outside the
//! layout. Everything else is application-defined.

/// Classification tag stored per cell.
pub type CellValue = u8;

/// Unknown / unclassified terrain.
pub const DEFAULT: CellValue = 0x99;

/// Returned by a grid read outside the layout bounds.
pub const ERROR: CellValue = 0xAB;

/// Value rasterized into `allow` polygons during document load.
pub const ALLOW: CellValue = 0x00;

/// Value rasterized into `block` polygons during document load.
pub const BLOCK: CellValue = DEFAULT;
