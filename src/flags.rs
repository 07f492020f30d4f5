//! # Condition Flags
//!
//! The LS-8 keeps three condition bits: less-than, greater-than and equal.
//! Only CMP writes them and only the conditional jumps read them.

use std::cmp::Ordering;

/// LT/GT/EQ condition flags.
///
/// At most one flag is set at a time; each compare overwrites all three.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// Set when the last compare found `reg_a < reg_b`
    pub lt: bool,

    /// Set when the last compare found `reg_a > reg_b`
    pub gt: bool,

    /// Set when the last compare found `reg_a == reg_b`
    pub eq: bool,
}

impl Flags {
    /// Creates a cleared flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the result of comparing `a` with `b`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ls8::Flags;
    ///
    /// let mut flags = Flags::new();
    /// flags.compare(3, 3);
    /// assert!(flags.eq && !flags.lt && !flags.gt);
    ///
    /// flags.compare(0, 255);
    /// assert!(flags.lt && !flags.eq && !flags.gt);
    /// ```
    pub fn compare(&mut self, a: u8, b: u8) {
        let ordering = a.cmp(&b);
        self.lt = ordering == Ordering::Less;
        self.gt = ordering == Ordering::Greater;
        self.eq = ordering == Ordering::Equal;
    }

    /// Returns the flags packed as the `FL` register byte.
    ///
    /// Bit layout (`00000LGE`):
    /// - Bit 2: L (less-than)
    /// - Bit 1: G (greater-than)
    /// - Bit 0: E (equal)
    pub fn bits(&self) -> u8 {
        let mut fl = 0;

        if self.lt {
            fl |= 0b100;
        }
        if self.gt {
            fl |= 0b010;
        }
        if self.eq {
            fl |= 0b001;
        }

        fl
    }
}
