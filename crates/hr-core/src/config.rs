use crate::error::{CodecError, Result};
use serde::{Deserialize, Serialize};

/// Longest code the generator accepts for a byte alphabet.
pub const DEFAULT_MAX_CODE_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub max_code_len: usize,
    pub verify_round_trip: bool,
    pub buffers: BufferConfig,
}

/// Starting capacities for the growable stage buffers. Buffers double from
/// here whenever an append would overflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// RLE output starts at `bits * rle_expansion + 1`.
    pub rle_expansion: usize,
    /// RLE decode output starts at `rle_len * decode_expansion + 1`.
    pub decode_expansion: usize,
}

impl CodecConfig {
    /// Parse a JSON config. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CodecConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_code_len == 0 {
            return Err(CodecError::InvalidConfig("max_code_len must be at least 1".into()));
        }
        if self.buffers.rle_expansion == 0 {
            return Err(CodecError::InvalidConfig("buffers.rle_expansion must be at least 1".into()));
        }
        if self.buffers.decode_expansion == 0 {
            return Err(CodecError::InvalidConfig(
                "buffers.decode_expansion must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_code_len: DEFAULT_MAX_CODE_LEN,
            verify_round_trip: true,
            buffers: BufferConfig::default(),
        }
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            rle_expansion: 2,
            decode_expansion: 8,
        }
    }
}
