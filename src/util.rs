/// Numeric conversion helpers.
///
/// This module provides exact conversions between `f64`, `i64` and `usize`
/// and the number formatting used when numbers are concatenated with text.
/// Conversions return `None` instead of silently truncating.
pub mod num;
