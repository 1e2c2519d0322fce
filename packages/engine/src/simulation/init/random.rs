/// Random number generator (xorshift32)
#[inline]
pub(super) fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

/// Uniform in [0, 1)
#[inline]
pub(super) fn next_unit(state: &mut u32) -> f32 {
    // Top 24 bits fit an f32 mantissa exactly.
    (xorshift32(state) >> 8) as f32 / (1u32 << 24) as f32
}

/// xorshift has a fixed point at zero.
pub(super) fn seed(seed: u32) -> u32 {
    if seed == 0 { 0x9E37_79B9 } else { seed }
}
