use crate::error::{KeyError, Result};

/// The widest universe supported: keys are stored as `u64`.
pub const MAX_WIDTH: u32 = 64;

/// Input that can be normalized into a key of a trie with a given width.
///
/// Integers are taken by value, byte sequences are read big-endian.
/// Anything else (floats, strings, collections) does not implement this trait
/// and is rejected at compile time.
pub trait KeyInput {
    fn to_fixed_width(self, width: u32) -> Result<u64>;
}

#[inline]
fn check_bits(value: u64, width: u32) -> Result<u64> {
    let bits = u64::BITS - value.leading_zeros();
    if bits > width {
        return Err(KeyError::TooWide { bits, width }.into());
    }
    Ok(value)
}

macro_rules! unsigned_key {
    ($($t:ty),*) => {
        $(
            impl KeyInput for $t {
                #[inline]
                fn to_fixed_width(self, width: u32) -> Result<u64> {
                    check_bits(self as u64, width)
                }
            }
        )*
    };
}

macro_rules! signed_key {
    ($($t:ty),*) => {
        $(
            impl KeyInput for $t {
                #[inline]
                fn to_fixed_width(self, width: u32) -> Result<u64> {
                    if self < 0 {
                        return Err(KeyError::Negative.into());
                    }
                    check_bits(self as u64, width)
                }
            }
        )*
    };
}

unsigned_key!(u8, u16, u32, u64, usize);
signed_key!(i8, i16, i32, i64, isize);

impl KeyInput for u128 {
    #[inline]
    fn to_fixed_width(self, width: u32) -> Result<u64> {
        let bits = u128::BITS - self.leading_zeros();
        if bits > width {
            return Err(KeyError::TooWide { bits, width }.into());
        }
        Ok(self as u64)
    }
}

impl KeyInput for &[u8] {
    fn to_fixed_width(self, width: u32) -> Result<u64> {
        if self.is_empty() {
            return Err(KeyError::EmptyBytes.into());
        }
        let max = width.div_ceil(8) as usize;
        if self.len() > max {
            return Err(KeyError::TooManyBytes {
                len: self.len(),
                max,
            }
            .into());
        }
        let value = self.iter().fold(0u64, |acc, b| (acc << 8) | *b as u64);
        check_bits(value, width)
    }
}

impl<const N: usize> KeyInput for [u8; N] {
    #[inline]
    fn to_fixed_width(self, width: u32) -> Result<u64> {
        self.as_slice().to_fixed_width(width)
    }
}

impl<const N: usize> KeyInput for &[u8; N] {
    #[inline]
    fn to_fixed_width(self, width: u32) -> Result<u64> {
        self.as_slice().to_fixed_width(width)
    }
}

impl KeyInput for &Vec<u8> {
    #[inline]
    fn to_fixed_width(self, width: u32) -> Result<u64> {
        self.as_slice().to_fixed_width(width)
    }
}

/// The top `level` bits of `key` in a `width`-bit universe.
#[inline]
pub(crate) fn prefix(key: u64, level: u32, width: u32) -> u64 {
    debug_assert!(level <= width);
    if level == 0 {
        0
    } else {
        key >> (width - level)
    }
}

/// The bit of `key` that picks the child below a node at `level`.
/// 0 is the left side, 1 the right.
#[inline]
pub(crate) fn branch(key: u64, level: u32, width: u32) -> usize {
    debug_assert!(level < width);
    ((key >> (width - level - 1)) & 1) as usize
}

/// Renders `key` as a string of exactly `width` ones and zeros.
pub(crate) fn bit_string(key: u64, width: u32) -> String {
    (0..width).map(|l| if branch(key, l, width) == 1 { '1' } else { '0' }).collect()
}
