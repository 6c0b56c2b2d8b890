//! Deterministic expansion of one uniform sample into two.

const TWO_POW_32: f64 = 4_294_967_296.0;
const TWO_POW_16: f64 = 65_536.0;

/// Transforms a uniformly distributed random variable on `[0, 1)` into two
/// uniformly distributed random variables, also on `[0, 1)`.
///
/// The input is scaled to 32 bits and split into its high and low 16-bit
/// halves, so the two outputs are independent of each other. The first
/// output carries the high half.
pub fn split_uniform(random: f64) -> (f64, f64) {
    let bits = (random * TWO_POW_32) as u32;
    let first = f64::from(bits >> 16) / TWO_POW_16;
    let second = f64::from(bits & 0xffff) / TWO_POW_16;
    (first, second)
}
