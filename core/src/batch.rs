//! Batch size parsing for the batch orders endpoint.

/// Orders returned when the caller does not ask for a count.
pub const DEFAULT_BATCH_SIZE: usize = 3;

/// Largest batch served in one request.
pub const MAX_BATCH_SIZE: usize = 20;

/// Number of orders to fabricate for one batch request, always in
/// `1..=`[`MAX_BATCH_SIZE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchSize(usize);

impl BatchSize {
    /// Read a raw `count` query value.
    ///
    /// The value is read leniently: leading whitespace, an optional sign and
    /// the longest run of digits; anything after the digits is ignored.
    /// Absent or digit-less input gives [`DEFAULT_BATCH_SIZE`]; everything
    /// else is clamped into `1..=`[`MAX_BATCH_SIZE`].
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.and_then(leading_integer) {
            None => Self(DEFAULT_BATCH_SIZE),
            Some(n) if n < 1 => Self(1),
            Some(n) => Self(usize::try_from(n).map_or(MAX_BATCH_SIZE, |n| n.min(MAX_BATCH_SIZE))),
        }
    }

    /// The batch size.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self(DEFAULT_BATCH_SIZE)
    }
}

/// Leading signed integer of `raw`, saturating on overflow.
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digit_count = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digit_count == 0 {
        return None;
    }

    // Only overflow can fail here, the slice is all ASCII digits.
    let magnitude = unsigned[..digit_count].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
