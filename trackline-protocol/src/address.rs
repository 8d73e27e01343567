//! DDRAM addressing
//!
//! The controller's 80-byte DDRAM is laid out as two 40-byte halves; four
//! line panels interleave them, so line 3 continues line 1 and line 4
//! continues line 2.

/// Highest supported line number
pub const MAX_LINES: u8 = 4;

/// DDRAM start address of lines 1-4
pub const LINE_OFFSETS: [u8; MAX_LINES as usize] = [0x00, 0x40, 0x14, 0x54];

/// Addressing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressError {
    /// Line number outside 1-4
    InvalidLine(u8),
}

impl core::fmt::Display for AddressError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AddressError::InvalidLine(line) => write!(f, "line {} is not valid", line),
        }
    }
}

/// DDRAM address of a column on a 1-based line
pub const fn ddram_address(line: u8, column: u8) -> Result<u8, AddressError> {
    if line == 0 || line > MAX_LINES {
        return Err(AddressError::InvalidLine(line));
    }
    Ok(LINE_OFFSETS[(line - 1) as usize].wrapping_add(column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_bases() {
        assert_eq!(ddram_address(1, 0), Ok(0x00));
        assert_eq!(ddram_address(2, 0), Ok(0x40));
        assert_eq!(ddram_address(3, 0), Ok(0x14));
        assert_eq!(ddram_address(4, 0), Ok(0x54));
    }

    #[test]
    fn test_column_offset() {
        assert_eq!(ddram_address(2, 5), Ok(0x45));
        assert_eq!(ddram_address(4, 19), Ok(0x67));
    }

    #[test]
    fn test_invalid_lines() {
        assert_eq!(ddram_address(0, 0), Err(AddressError::InvalidLine(0)));
        assert_eq!(ddram_address(5, 0), Err(AddressError::InvalidLine(5)));
        assert_eq!(ddram_address(255, 3), Err(AddressError::InvalidLine(255)));
    }
}
