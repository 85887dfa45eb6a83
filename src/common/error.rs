use std::fmt::{Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // Input
    EmptyContent,
    UnsupportedCharacter,
    PayloadTooLarge,

    // Configuration
    InvalidVersion,
    InvalidMaskPattern,

    // Construction
    InternalInvariantViolation(&'static str),
}

impl Display for QRError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let msg = match *self {
            Self::EmptyContent => "Empty content",
            Self::UnsupportedCharacter => "Character not supported by the encoding mode",
            Self::PayloadTooLarge => "Payload too large for the requested version & ec level",
            Self::InvalidVersion => "Invalid version",
            Self::InvalidMaskPattern => "Invalid masking pattern",
            Self::InternalInvariantViolation(what) => {
                return write!(f, "Internal invariant violated: {what}");
            }
        };
        f.write_str(msg)
    }
}

impl std::error::Error for QRError {}

pub type QRResult<T> = Result<T, QRError>;

#[cfg(test)]
mod error_tests {
    use super::QRError;

    #[test]
    fn test_display() {
        assert_eq!(QRError::EmptyContent.to_string(), "Empty content");
        assert_eq!(QRError::InvalidVersion.to_string(), "Invalid version");
        assert_eq!(
            QRError::InternalInvariantViolation("cell count").to_string(),
            "Internal invariant violated: cell count"
        );
    }
}
