//! Fingerprints of finished creatives.
//!
//! Two passes over the same template and state must leave byte-identical
//! surfaces; comparing their [`FrameHash`]es is how that is checked.

use sha2::{Digest, Sha256};

use crate::frame::FrameBuffer;

/// SHA-256 over a surface's size and pixels. Displays as lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHash([u8; 32]);

impl FrameHash {
    pub fn of(frame: &FrameBuffer) -> Self {
        let digest = Sha256::new()
            .chain_update(frame.width.to_le_bytes())
            .chain_update(frame.height.to_le_bytes())
            .chain_update(&frame.data)
            .finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }
}

impl std::fmt::Display for FrameHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{b:02x}"))
    }
}
