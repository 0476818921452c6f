//! Deterministic string hash used for atomic class names.
//!
//! This is the murmur2 variant the JavaScript ecosystem popularised for
//! CSS-in-JS class name generation, rendered in base36. Atomic class names
//! are built from two of these hashes (a group hash over the selector and
//! property, and a value hash over the rendered value), so the function must
//! produce byte-identical output across runs and machines.
//!
//! The JavaScript source emulates 32-bit multiplication by splitting each
//! operand into 16-bit halves to stay inside float53 precision; modulo 2^32
//! that dance is exactly `u32::wrapping_mul`, which is what we use.

const SEED: u32 = 0;
const M: u32 = 0x5bd1e995;

/// Hash `key` and render the result in base36, matching the JS port
/// bit-for-bit (`(h >>> 0).toString(36)`).
pub fn hash(key: &str) -> String {
  to_base36(murmur2(key.as_bytes(), SEED))
}

fn murmur2(bytes: &[u8], seed: u32) -> u32 {
  let mut h = seed ^ (bytes.len() as u32);

  let mut chunks = bytes.chunks_exact(4);
  for chunk in &mut chunks {
    let mut k = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    k = k.wrapping_mul(M);
    k ^= k >> 24;
    k = k.wrapping_mul(M);
    h = h.wrapping_mul(M) ^ k;
  }

  let tail = chunks.remainder();
  if !tail.is_empty() {
    for (shift, byte) in tail.iter().enumerate() {
      h ^= (*byte as u32) << (shift * 8);
    }
    h = h.wrapping_mul(M);
  }

  h ^= h >> 13;
  h = h.wrapping_mul(M);
  h ^ (h >> 15)
}

fn to_base36(mut num: u32) -> String {
  const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

  if num == 0 {
    return "0".to_string();
  }

  let mut out = [0u8; 7];
  let mut at = out.len();
  while num > 0 {
    at -= 1;
    out[at] = DIGITS[(num % 36) as usize];
    num /= 36;
  }

  // Only ASCII digits are ever written.
  std::str::from_utf8(&out[at..]).unwrap().to_string()
}
