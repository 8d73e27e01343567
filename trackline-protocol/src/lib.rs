//! HD44780 wire protocol over a PCF8574 I2C expander
//!
//! The HD44780 runs in 4-bit mode behind an 8-bit I/O expander. Every 8-bit
//! instruction or data value travels as two nibbles, and every nibble is
//! strobed onto the bus as three expander writes:
//!
//! ```text
//! expander bit:   7   6   5   4   3    2   1    0
//!                ┌───┬───┬───┬───┬────┬───┬────┬────┐
//!                │D7 │D6 │D5 │D4 │ BL │ E │ RW │ RS │
//!                └───┴───┴───┴───┴────┴───┴────┴────┘
//!
//! one value  = [hi | mode | bl, hi | mode | bl | E, hi | mode | bl,
//!               lo | mode | bl, lo | mode | bl | E, lo | mode | bl]
//! ```
//!
//! The controller latches D4-D7 on the falling edge of E, so dropping the
//! enable pulse or swapping the nibble order corrupts what is shown.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod address;
pub mod charset;
pub mod instruction;
pub mod nibble;

pub use address::{ddram_address, AddressError, MAX_LINES};
pub use charset::{encode_char, encode_str};
pub use instruction::Instruction;
pub use nibble::{
    decode, encode, encode_nibble, nibble, unnibble, Backlight, Mode, STROBE_LEN, VALUE_LEN,
};
