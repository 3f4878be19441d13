//! Low-level bit-range access on the fixed-width words that carry CAN
//! arbitration identifiers.
//!
//! Identifier layouts are documented MSB first: offset `0` designates the most
//! significant bit of the word, whatever its width (11 or 29 bits). A
//! [`BitField`] translates that numbering into shifts and masks on the raw
//! integer so callers never have to.
//!
//! ```text
//! word width 29, BitField { offset: 5, width: 8 }
//!
//!  MSB                                                    LSB
//!  [0 1 2 3 4][5 6 7 8 9 10 11 12][13 ............... 28]
//!             ^------ field ------^
//!  shift = 29 - 5 - 8 = 16
//! ```

/// Contiguous range of bits inside an identifier word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitField {
    /// Position of the first bit, counted from the most significant bit.
    pub offset: u8,
    /// Number of bits in the field (1 to 32).
    pub width: u8,
}

impl BitField {
    /// Describe a field of `width` bits starting `offset` bits after the MSB.
    pub const fn new(offset: u8, width: u8) -> Self {
        Self { offset, width }
    }

    /// Largest value the field can hold.
    #[inline]
    pub const fn max(&self) -> u32 {
        if self.width >= 32 {
            u32::MAX
        } else {
            (1u32 << self.width) - 1
        }
    }

    /// Whether `value` can be stored without truncation.
    #[inline]
    pub const fn fits(&self, value: u32) -> bool {
        value <= self.max()
    }

    /// Right shift bringing the field down to bit 0 of a `word_width` word.
    #[inline]
    const fn shift(&self, word_width: u8) -> u32 {
        (word_width - self.offset - self.width) as u32
    }

    /// Extract the field from `raw`, a word of `word_width` bits.
    #[inline]
    pub const fn read(&self, raw: u32, word_width: u8) -> u32 {
        (raw >> self.shift(word_width)) & self.max()
    }

    /// Return `raw` with the field replaced by `value`.
    ///
    /// `value` is masked to the field width; every other bit is preserved.
    #[inline]
    pub const fn write(&self, raw: u32, word_width: u8, value: u32) -> u32 {
        let shift = self.shift(word_width);
        let mask = self.max() << shift;
        (raw & !mask) | ((value & self.max()) << shift)
    }
}

/// Mask covering the low `width` bits of a word.
#[inline]
pub const fn word_mask(width: u8) -> u32 {
    BitField::new(0, width).max()
}

/// Number of hexadecimal digits needed once `width` bits are left-padded
/// with zeros up to the next byte boundary.
#[inline]
pub const fn padded_hex_digits(width: u8) -> usize {
    (width as usize).div_ceil(8) * 2
}
