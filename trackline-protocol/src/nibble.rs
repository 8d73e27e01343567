//! Nibble packing and enable-strobe expansion
//!
//! Layout of a single expander write (PCF8574 backpack):
//! - bits 4-7: D4-D7 (one nibble of the HD44780 value)
//! - bit 3: backlight
//! - bit 2: E (enable strobe)
//! - bit 1: RW (read/write)
//! - bit 0: RS (register select)

/// Register select: data register when set, instruction register when clear
pub const RS: u8 = 0x01;
/// Read when set, write when clear
pub const RW: u8 = 0x02;
/// Enable strobe line
pub const EN: u8 = 0x04;
/// Backlight transistor on the backpack
pub const BACKLIGHT: u8 = 0x08;

/// Bus bytes per strobed nibble
pub const STROBE_LEN: usize = 3;

/// Bus bytes per 8-bit value (two strobed nibbles)
pub const VALUE_LEN: usize = 2 * STROBE_LEN;

/// Register and direction of a transfer
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Write to the instruction register
    WriteInstruction = 0,
    /// Write to the data register (DDRAM/CGRAM)
    WriteData = RS,
    /// Read busy flag and address counter
    ReadInstruction = RW,
    /// Read from DDRAM/CGRAM
    ReadData = RW | RS,
}

impl Mode {
    /// Control bits this mode puts on the bus
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Recover the mode from the low control bits of a bus byte
    pub const fn from_bits(bits: u8) -> Self {
        match bits & (RW | RS) {
            0 => Mode::WriteInstruction,
            RS => Mode::WriteData,
            RW => Mode::ReadInstruction,
            _ => Mode::ReadData,
        }
    }
}

/// Backlight state piggybacked on every bus byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Backlight {
    #[default]
    Off,
    On,
}

impl Backlight {
    /// Expander bit for this state
    pub const fn bits(self) -> u8 {
        match self {
            Backlight::Off => 0,
            Backlight::On => BACKLIGHT,
        }
    }

    pub const fn is_on(self) -> bool {
        matches!(self, Backlight::On)
    }
}

impl From<bool> for Backlight {
    fn from(on: bool) -> Self {
        if on {
            Backlight::On
        } else {
            Backlight::Off
        }
    }
}

/// Split an 8-bit value into two bus nibbles, high nibble first
///
/// Both nibbles land on D4-D7 and carry the mode bits.
pub const fn nibble(mode: Mode, value: u8) -> [u8; 2] {
    let high = value & 0xF0;
    let low = (value << 4) & 0xF0;
    [high | mode.bits(), low | mode.bits()]
}

/// Merge two bus nibbles back into an 8-bit value
pub const fn unnibble(nibbles: [u8; 2]) -> u8 {
    let high = nibbles[0] & 0xF0;
    let low = (nibbles[1] & 0xF0) >> 4;
    high | low
}

/// Expand one bus nibble into its enable strobe: low, high, low
pub const fn encode_nibble(nibble: u8, backlight: Backlight) -> [u8; STROBE_LEN] {
    let value = (nibble | backlight.bits()) & !EN;
    [value, value | EN, value]
}

/// Encode an 8-bit value into the six bus bytes of one transaction
pub const fn encode(mode: Mode, value: u8, backlight: Backlight) -> [u8; VALUE_LEN] {
    let [high, low] = nibble(mode, value);
    let h = encode_nibble(high, backlight);
    let l = encode_nibble(low, backlight);
    [h[0], h[1], h[2], l[0], l[1], l[2]]
}

/// Decode six bus bytes back into mode, value and backlight
///
/// Returns `None` if the bytes are not two well-formed strobes sharing the
/// same control bits.
pub fn decode(bytes: &[u8; VALUE_LEN]) -> Option<(Mode, u8, Backlight)> {
    let (high, low) = bytes.split_at(STROBE_LEN);
    let high = strobed_nibble(high)?;
    let low = strobed_nibble(low)?;

    let control = RW | RS | BACKLIGHT;
    if high & control != low & control {
        return None;
    }

    let backlight = Backlight::from(high & BACKLIGHT != 0);
    Some((Mode::from_bits(high), unnibble([high, low]), backlight))
}

fn strobed_nibble(strobe: &[u8]) -> Option<u8> {
    match *strobe {
        [before, pulse, after] if before == after && pulse == before | EN && before & EN == 0 => {
            Some(before)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_nibble_order_high_first() {
        assert_eq!(nibble(Mode::WriteInstruction, 0xC0), [0xC0, 0x00]);
        assert_eq!(nibble(Mode::WriteData, 0x41), [0x41, 0x11]);
    }

    #[test]
    fn test_encode_data_byte() {
        // 'A' with the backlight on
        let bytes = encode(Mode::WriteData, b'A', Backlight::On);
        assert_eq!(bytes, [0x49, 0x4D, 0x49, 0x19, 0x1D, 0x19]);
    }

    #[test]
    fn test_encode_instruction_backlight_off() {
        let bytes = encode(Mode::WriteInstruction, 0x01, Backlight::Off);
        assert_eq!(bytes, [0x00, 0x04, 0x00, 0x10, 0x14, 0x10]);
    }

    #[test]
    fn test_encode_nibble_clears_stray_enable() {
        assert_eq!(encode_nibble(0x30 | EN, Backlight::On), [0x38, 0x3C, 0x38]);
    }

    #[test]
    fn test_decode_rejects_missing_strobe() {
        let mut bytes = encode(Mode::WriteData, b'x', Backlight::On);
        bytes[1] &= !EN;
        assert_eq!(decode(&bytes), None);
    }

    #[test]
    fn test_decode_rejects_mixed_modes() {
        let data = encode(Mode::WriteData, 0x55, Backlight::On);
        let instr = encode(Mode::WriteInstruction, 0x55, Backlight::On);
        let mut bytes = data;
        bytes[3..].copy_from_slice(&instr[3..]);
        assert_eq!(decode(&bytes), None);
    }

    proptest! {
        #[test]
        fn prop_nibble_roundtrip(value in any::<u8>(), mode in 0u8..4) {
            let mode = Mode::from_bits(mode);
            prop_assert_eq!(unnibble(nibble(mode, value)), value);
        }

        #[test]
        fn prop_encode_decode(value in any::<u8>(), mode in 0u8..4, on in any::<bool>()) {
            let mode = Mode::from_bits(mode);
            let backlight = Backlight::from(on);
            let bytes = encode(mode, value, backlight);
            prop_assert_eq!(decode(&bytes), Some((mode, value, backlight)));
        }
    }
}
