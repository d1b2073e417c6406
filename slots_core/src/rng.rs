use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::{Digest, Sha256};

// Provably-fair stream: HMAC-SHA256(server_seed, "client_seed:nonce") -> bytes -> floats in [0,1)
// The stream is extended by hashing the previous block once its bytes run out.

pub type HmacSha256 = Hmac<Sha256>;

/// Source of uniform integers the spin engine draws from.
pub trait RandomSource {
    /// Uniform value in `[0, bound)`. `bound` is always at least 1.
    fn next_below(&mut self, bound: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_below(&mut self, bound: usize) -> usize {
        (**self).next_below(bound)
    }
}

pub fn derive_hash_hex(input: &[u8]) -> String {
    hex::encode(Sha256::digest(input))
}

#[derive(Debug, Clone)]
pub struct ProvablyFairRng {
    server_seed: String, // secret until revealed at the end of a session
    client_seed: String,
    nonce: u64,
    block: Vec<u8>,
    cursor: usize,
}

impl ProvablyFairRng {
    pub fn new(server_seed: impl Into<String>, client_seed: impl Into<String>, nonce: u64) -> Self {
        let server_seed = server_seed.into();
        let client_seed = client_seed.into();
        let block = hmac_bytes(&server_seed, &client_seed, nonce).to_vec();
        Self {
            server_seed,
            client_seed,
            nonce,
            block,
            cursor: 0,
        }
    }

    /// Seeds the stream with a random 32-byte server seed.
    pub fn from_entropy(client_seed: impl Into<String>, nonce: u64) -> Self {
        let mut seed = [0u8; 32];
        rand::rng().fill(&mut seed);
        Self::new(hex::encode(seed), client_seed, nonce)
    }

    pub fn server_seed(&self) -> &str {
        &self.server_seed
    }

    pub fn client_seed(&self) -> &str {
        &self.client_seed
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn server_seed_hash_hex(&self) -> String {
        derive_hash_hex(self.server_seed.as_bytes())
    }

    pub fn next_float(&mut self) -> f64 {
        if self.cursor + 4 > self.block.len() {
            self.block = Sha256::digest(&self.block).to_vec();
            self.cursor = 0;
        }
        let chunk = &self.block[self.cursor..self.cursor + 4];
        let v = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        self.cursor += 4;
        (v as f64) / (u32::MAX as f64 + 1.0)
    }

    pub fn next_floats(&mut self, count: usize) -> Vec<f64> {
        (0..count).map(|_| self.next_float()).collect()
    }
}

impl RandomSource for ProvablyFairRng {
    fn next_below(&mut self, bound: usize) -> usize {
        if bound <= 1 {
            return 0;
        }
        let scaled = (self.next_float() * bound as f64).floor() as usize;
        scaled.min(bound - 1)
    }
}

fn hmac_bytes(server_seed: &str, client_seed: &str, nonce: u64) -> [u8; 32] {
    let mut mac =
        HmacSha256::new_from_slice(server_seed.as_bytes()).expect("HMAC takes keys of any size");
    mac.update(format!("{client_seed}:{nonce}").as_bytes());
    let mut out = [0u8; 32];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// Replays a fixed list of draws, wrapping around when it runs out.
///
/// Each value is reduced modulo the requested bound, so scripts can be written
/// as "offset into the remaining pool".
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<usize>,
    pos: usize,
}

impl ScriptedRng {
    pub fn new(values: impl Into<Vec<usize>>) -> Self {
        Self {
            values: values.into(),
            pos: 0,
        }
    }
}

impl RandomSource for ScriptedRng {
    fn next_below(&mut self, bound: usize) -> usize {
        if self.values.is_empty() || bound == 0 {
            return 0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = ProvablyFairRng::new("server", "client", 1);
        let mut rng2 = ProvablyFairRng::new("server", "client", 1);
        assert_eq!(rng1.server_seed_hash_hex(), rng2.server_seed_hash_hex());
        assert_eq!(rng1.next_floats(20), rng2.next_floats(20));
    }

    #[test]
    fn stream_extends_past_first_block() {
        let mut rng = ProvablyFairRng::new("server", "client", 1);
        let floats = rng.next_floats(30);
        assert!(floats.iter().all(|f| (0.0..1.0).contains(f)));
        let mut again = ProvablyFairRng::new("server", "client", 1);
        assert_eq!(again.next_floats(30), floats);
    }

    #[test]
    fn nonce_changes_stream() {
        let mut a = ProvablyFairRng::new("server", "client", 1);
        let mut b = ProvablyFairRng::new("server", "client", 2);
        assert_ne!(a.next_floats(8), b.next_floats(8));
    }

    #[test]
    fn next_below_stays_in_bounds() {
        let mut rng = ProvablyFairRng::from_entropy("client", 0);
        assert_eq!(rng.server_seed().len(), 64);
        for bound in 1..50 {
            assert!(rng.next_below(bound) < bound);
        }
    }

    #[test]
    fn scripted_wraps_and_reduces() {
        let mut rng = ScriptedRng::new(vec![3, 7]);
        assert_eq!(rng.next_below(5), 3);
        assert_eq!(rng.next_below(5), 2);
        assert_eq!(rng.next_below(10), 3);
    }
}
