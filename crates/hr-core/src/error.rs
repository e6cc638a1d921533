use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Allocation failed: could not reserve {requested} elements for {what}")]
    AllocationFailure { what: &'static str, requested: usize },
    #[error("Malformed RLE input: {found:?} at position {position} is not a decimal digit")]
    MalformedRleInput { position: usize, found: char },
    #[error("Run-length count starting at position {position} does not fit in 64 bits")]
    CountOverflow { position: usize },
    #[error("Invalid RLE encoding: count at position {position} has no preceding stored payload")]
    InvalidCountContext { position: usize },
    #[error("RLE input ended inside an unterminated key at position {position}")]
    IncompleteRleKey { position: usize },
    #[error("Malformed Huffman input: {found:?} at position {position} is not '0' or '1'")]
    MalformedHuffmanInput { position: usize, found: char },
    #[error("Traversal left the Huffman tree at position {position}")]
    TreeTraversalFailure { position: usize },
    #[error("Huffman input ended inside a code at position {position}")]
    IncompleteCode { position: usize },
    #[error("Code for symbol {symbol:#04x} is {length} bits long, limit is {limit}")]
    CodeLengthExceeded { symbol: u8, length: usize, limit: usize },
    #[error("No code for symbol {symbol:#04x}")]
    MissingCode { symbol: u8 },
    #[error("Input is empty")]
    EmptyInput,
    #[error("Round trip mismatch after {stage}")]
    RoundTripMismatch { stage: &'static str },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CodecError {
    /// Shorthand for a failed reservation of `requested` elements.
    pub fn alloc(what: &'static str, requested: usize) -> Self {
        CodecError::AllocationFailure { what, requested }
    }

    /// True for errors caused by the bytes handed to a decoder.
    pub fn is_corrupt_input(&self) -> bool {
        matches!(
            self,
            Self::MalformedRleInput { .. }
                | Self::CountOverflow { .. }
                | Self::InvalidCountContext { .. }
                | Self::IncompleteRleKey { .. }
                | Self::MalformedHuffmanInput { .. }
                | Self::TreeTraversalFailure { .. }
                | Self::IncompleteCode { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_malformed_huffman() {
        let err = CodecError::MalformedHuffmanInput { position: 4, found: 'x' };
        assert_eq!(
            err.to_string(),
            "Malformed Huffman input: 'x' at position 4 is not '0' or '1'"
        );
    }

    #[test]
    fn test_display_code_length() {
        let err = CodecError::CodeLengthExceeded { symbol: b'a', length: 300, limit: 255 };
        assert_eq!(err.to_string(), "Code for symbol 0x61 is 300 bits long, limit is 255");
    }

    #[test]
    fn test_corrupt_input_classification() {
        assert!(CodecError::InvalidCountContext { position: 0 }.is_corrupt_input());
        assert!(CodecError::TreeTraversalFailure { position: 2 }.is_corrupt_input());
        assert!(!CodecError::EmptyInput.is_corrupt_input());
        assert!(!CodecError::alloc("test", 1).is_corrupt_input());
    }

    #[test]
    fn test_from_serde_json() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: CodecError = parse.unwrap_err().into();
        assert!(matches!(err, CodecError::Serialization(_)));
    }
}
