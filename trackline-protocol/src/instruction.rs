//! HD44780 instruction set
//!
//! Instruction bytes are the command base OR'd with its flags.

// Command bases
pub const CMD_CLEAR_DISPLAY: u8 = 0x01;
pub const CMD_RETURN_HOME: u8 = 0x02;
pub const CMD_ENTRY_MODE_SET: u8 = 0x04;
pub const CMD_DISPLAY_CONTROL: u8 = 0x08;
pub const CMD_CURSOR_SHIFT: u8 = 0x10;
pub const CMD_FUNCTION_SET: u8 = 0x20;
pub const CMD_SET_CGRAM_ADDR: u8 = 0x40;
pub const CMD_SET_DDRAM_ADDR: u8 = 0x80;

// Entry mode flags
pub const ENTRY_LEFT: u8 = 0x02;
pub const ENTRY_SHIFT_INCREMENT: u8 = 0x01;

// Display control flags
pub const DISPLAY_ON: u8 = 0x04;
pub const CURSOR_ON: u8 = 0x02;
pub const BLINK_ON: u8 = 0x01;

// Cursor/display shift flags
pub const MOVE_DISPLAY: u8 = 0x08;
pub const MOVE_RIGHT: u8 = 0x04;

// Function set flags
pub const FUNC_8BIT_MODE: u8 = 0x10;
pub const FUNC_2LINE: u8 = 0x08;
pub const FUNC_5X10_DOTS: u8 = 0x04;

/// Nibble written three times during the cold start to resynchronise the
/// controller into 8-bit mode, whatever state it powered up in
pub const PRIMER_NIBBLE: u8 = 0x03;

/// Nibble that switches the controller from 8-bit into 4-bit mode
pub const FOUR_BIT_NIBBLE: u8 = 0x02;

/// Instruction that changes nothing; used to latch expander-only bits
pub const NOOP: u8 = 0x00;

/// A controller instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Instruction {
    /// Blank DDRAM and return the cursor home (1.52ms)
    ClearDisplay,
    /// Return the cursor and any display shift home (1.52ms)
    ReturnHome,
    /// Cursor direction and display shift on write
    EntryModeSet { left_to_right: bool, shift: bool },
    /// Display, cursor and blink enable
    DisplayControl {
        display: bool,
        cursor: bool,
        blink: bool,
    },
    /// Move the cursor or shift the display without writing
    CursorShift { display: bool, right: bool },
    /// Interface width, line count and font
    FunctionSet {
        eight_bit: bool,
        two_line: bool,
        large_font: bool,
    },
    /// Point the address counter into CGRAM (6 bits)
    SetCgramAddress(u8),
    /// Point the address counter into DDRAM (7 bits)
    SetDdramAddress(u8),
}

impl Instruction {
    /// Encode the instruction byte
    pub const fn to_byte(self) -> u8 {
        match self {
            Instruction::ClearDisplay => CMD_CLEAR_DISPLAY,
            Instruction::ReturnHome => CMD_RETURN_HOME,
            Instruction::EntryModeSet {
                left_to_right,
                shift,
            } => {
                CMD_ENTRY_MODE_SET
                    | flag(left_to_right, ENTRY_LEFT)
                    | flag(shift, ENTRY_SHIFT_INCREMENT)
            }
            Instruction::DisplayControl {
                display,
                cursor,
                blink,
            } => {
                CMD_DISPLAY_CONTROL
                    | flag(display, DISPLAY_ON)
                    | flag(cursor, CURSOR_ON)
                    | flag(blink, BLINK_ON)
            }
            Instruction::CursorShift { display, right } => {
                CMD_CURSOR_SHIFT | flag(display, MOVE_DISPLAY) | flag(right, MOVE_RIGHT)
            }
            Instruction::FunctionSet {
                eight_bit,
                two_line,
                large_font,
            } => {
                CMD_FUNCTION_SET
                    | flag(eight_bit, FUNC_8BIT_MODE)
                    | flag(two_line, FUNC_2LINE)
                    | flag(large_font, FUNC_5X10_DOTS)
            }
            Instruction::SetCgramAddress(addr) => CMD_SET_CGRAM_ADDR | (addr & 0x3F),
            Instruction::SetDdramAddress(addr) => CMD_SET_DDRAM_ADDR | (addr & 0x7F),
        }
    }

    /// Whether the controller needs the long (1.52ms) execution time
    pub const fn is_slow(self) -> bool {
        matches!(self, Instruction::ClearDisplay | Instruction::ReturnHome)
    }
}

impl From<Instruction> for u8 {
    fn from(instruction: Instruction) -> Self {
        instruction.to_byte()
    }
}

const fn flag(set: bool, bit: u8) -> u8 {
    if set {
        bit
    } else {
        0
    }
}
