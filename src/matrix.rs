use crate::common::{
    codec::Mode,
    mask::MaskPattern,
    metadata::{ECLevel, Version},
};

/// Finished QR symbol, quiet zone included. `true` is a dark module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    modules: Vec<bool>,
    size: usize,
    margin: usize,
    version: Version,
    ec_level: ECLevel,
    mask: MaskPattern,
    mode: Mode,
}

impl Matrix {
    pub(crate) fn new(
        modules: Vec<bool>,
        size: usize,
        margin: usize,
        version: Version,
        ec_level: ECLevel,
        mask: MaskPattern,
        mode: Mode,
    ) -> Self {
        debug_assert!(
            modules.len() == size * size,
            "Module count {} for size {size}",
            modules.len()
        );
        Self { modules, size, margin, version, ec_level, mask, mode }
    }

    /// Side length in modules, margin on both sides included.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Side length of the symbol itself, without margin.
    pub fn width(&self) -> usize {
        self.size - 2 * self.margin
    }

    pub fn margin(&self) -> usize {
        self.margin
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Column `x`, row `y`, origin at the top left of the quiet zone. Anything outside the
    /// matrix reads as light.
    pub fn dark_at(&self, x: usize, y: usize) -> bool {
        if x >= self.size || y >= self.size {
            return false;
        }
        self.modules[y * self.size + x]
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.modules.chunks_exact(self.size)
    }
}
