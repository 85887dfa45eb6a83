mod ec;
mod qr;

pub use ec::error_correction_capacity;
pub(crate) use qr::{Module, QR};

use tracing::debug;

use crate::common::{
    codec::{encode_segment, find_version, Mode, Segment},
    error::{QRError, QRResult},
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};
use crate::matrix::Matrix;

/// Light border width recommended for scanners.
pub const DEFAULT_MARGIN: usize = 4;

/// Configures and builds a single QR symbol.
///
/// Only the content is required. Version, mode and mask are chosen automatically unless
/// they are pinned through the corresponding setters.
pub struct QRBuilder<'a> {
    content: &'a str,
    version: Option<Version>,
    ec_level: ECLevel,
    margin: usize,
    mask: Option<MaskPattern>,
    mode: Option<Mode>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            version: None,
            ec_level: ECLevel::M,
            margin: DEFAULT_MARGIN,
            mask: None,
            mode: None,
        }
    }

    pub fn content(&mut self, content: &'a str) -> &mut Self {
        self.content = content;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn margin(&mut self, margin: usize) -> &mut Self {
        self.margin = margin;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    /// Forces the segment mode. Needed for Kanji, which is never picked automatically.
    pub fn mode(&mut self, mode: Mode) -> &mut Self {
        self.mode = Some(mode);
        self
    }

    pub fn metadata(&self) -> String {
        let version = match self.version {
            Some(v) => format!("{}", *v),
            None => "None".to_string(),
        };
        format!("{{ Version: {version}, Ec level: {:?}, Margin: {} }}", self.ec_level, self.margin)
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<Matrix> {
        if self.content.is_empty() {
            return Err(QRError::EmptyContent);
        }

        let mode = self.mode.unwrap_or_else(|| Mode::classify(self.content));
        let segment = Segment::new(mode, self.content)?;

        let version = match self.version {
            Some(v) => v,
            None => find_version(&segment, self.ec_level)?,
        };
        let encoded = encode_segment(&segment, version, self.ec_level)?;
        let payload = ec::build_payload(encoded.data(), version, self.ec_level)?;

        let mut qr = QR::new(version, self.ec_level);
        qr.draw_all_function_patterns();
        qr.draw_encoding_region(payload)?;

        let mask = match self.mask {
            Some(m) => {
                qr.apply_mask(m);
                m
            }
            None => apply_best_mask(&mut qr),
        };
        let matrix = qr.to_matrix(self.margin, mode)?;

        debug!("Generated QR {}", self.metadata());
        debug!("Encoded {} characters in {:?} mode", segment.char_cnt(), mode);
        debug!(
            "Version {}: {} data codewords, {} ec codewords in {} blocks",
            *version,
            version.data_codewords(self.ec_level),
            version.ecc_per_block(self.ec_level) * version.block_count(self.ec_level),
            version.block_count(self.ec_level)
        );
        let total_modules = version.width() * version.width();
        let dark_modules = qr.count_dark_modules();
        debug!(
            "Applied mask {}, dark modules {} of {} ({}%), correctable codewords {}",
            *mask,
            dark_modules,
            total_modules,
            dark_modules * 100 / total_modules,
            error_correction_capacity(version, self.ec_level)
        );

        Ok(matrix)
    }
}
