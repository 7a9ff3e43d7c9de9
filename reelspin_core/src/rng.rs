use hmac::{Hmac, Mac};
use sha2::Sha256;

// Start offsets: HMAC-SHA256(seed, "reels:<nonce>:<block>"), read as big-endian u32 words

type HmacSha256 = Hmac<Sha256>;

/// Seed plus nonce from which a run's start positions are derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSeed {
    pub seed: String,
    pub nonce: u64,
}

impl PositionSeed {
    pub fn new(seed: impl Into<String>, nonce: u64) -> Self {
        Self {
            seed: seed.into(),
            nonce,
        }
    }

    /// One 32-byte MAC per block; blocks are consumed in order as more lanes are needed.
    pub fn block(&self, block: u64) -> [u8; 32] {
        let mut mac =
            HmacSha256::new_from_slice(self.seed.as_bytes()).expect("HMAC takes any key size");
        mac.update(format!("reels:{}:{}", self.nonce, block).as_bytes());
        let mut out = [0u8; 32];
        out.copy_from_slice(&mac.finalize().into_bytes());
        out
    }

    fn unit_floats(&self) -> impl Iterator<Item = f64> + '_ {
        (0u64..).flat_map(move |b| {
            let bytes = self.block(b);
            (0..8).map(move |w| {
                let word = u32::from_be_bytes([
                    bytes[w * 4],
                    bytes[w * 4 + 1],
                    bytes[w * 4 + 2],
                    bytes[w * 4 + 3],
                ]);
                word as f64 / (u32::MAX as f64 + 1.0)
            })
        })
    }

    /// `count` offsets in `[0, track_length)`, snapped down to whole pixels.
    pub fn positions(&self, count: usize, track_length: f64) -> Vec<f64> {
        self.unit_floats()
            .take(count)
            .map(|f| (f * track_length).floor())
            .collect()
    }
}
