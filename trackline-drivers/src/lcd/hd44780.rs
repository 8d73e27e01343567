//! HD44780 driver over a PCF8574 I2C backpack
//!
//! The controller runs in 4-bit mode; see `trackline_protocol` for the
//! byte layout. Every bus operation holds one async lock for its whole
//! duration, so a `show` from one task never interleaves with a backlight
//! change from another.
//!
//! # Cold start
//!
//! The controller may power up in 8-bit mode or half way through a 4-bit
//! transfer. Three `0x3` primers bring it into a known 8-bit state from
//! any of those, then `0x2` switches it to 4-bit mode:
//!
//! | step            | value | wait    |
//! |-----------------|-------|---------|
//! | power-up        |       | 40ms    |
//! | primer          | 0x3   | 5ms     |
//! | primer          | 0x3   | 150µs   |
//! | primer          | 0x3   | 150µs   |
//! | 4-bit switch    | 0x2   | 150µs   |
//! | FunctionSet     | 0x28  |         |
//! | DisplayControl  | 0x0C  |         |
//! | ClearDisplay    | 0x01  | 2ms     |
//! | EntryModeSet    | 0x06  |         |
//! | backlight latch | 0x00  |         |

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Timer};
use log::{debug, info, warn};

use trackline_display::LineDisplay;
use trackline_hal::{I2cBus, OpenI2cBus};
use trackline_protocol::instruction::{FOUR_BIT_NIBBLE, NOOP, PRIMER_NIBBLE};
use trackline_protocol::nibble::EN;
use trackline_protocol::{
    ddram_address, encode, encode_nibble, encode_str, unnibble, Backlight, Instruction, Mode,
};

use super::LcdError;

/// Power-up settle time before the first primer
const POWER_UP_DELAY: Duration = Duration::from_millis(40);
/// Wait after the first primer
const PRIMER_DELAY: Duration = Duration::from_millis(5);
/// Wait after the remaining primers and the 4-bit switch
const SHORT_PRIMER_DELAY: Duration = Duration::from_micros(150);
/// Execution time of clear display and return home
const SLOW_INSTRUCTION_DELAY: Duration = Duration::from_millis(2);

/// Busy flag and address counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// Controller is still executing the last instruction
    pub busy: bool,
    /// Current DDRAM/CGRAM address (7 bits)
    pub address_counter: u8,
}

impl From<u8> for Status {
    fn from(value: u8) -> Self {
        Self {
            busy: value & 0x80 != 0,
            address_counter: value & 0x7F,
        }
    }
}

struct Inner<B> {
    bus: B,
    backlight: Backlight,
}

impl<B: I2cBus> Inner<B> {
    /// One 8-bit value as a single six-byte transaction
    fn send(&mut self, address: u8, mode: Mode, value: u8) -> Result<(), LcdError<B::Error>> {
        let bytes = encode(mode, value, self.backlight);
        self.bus
            .write(address, &bytes)
            .map_err(LcdError::BusWriteFailed)
    }

    /// One strobed nibble on D4-D7, used only during the cold start
    fn send_nibble(&mut self, address: u8, nibble: u8) -> Result<(), LcdError<B::Error>> {
        let bytes = encode_nibble(nibble << 4, self.backlight);
        self.bus
            .write(address, &bytes)
            .map_err(LcdError::BusWriteFailed)
    }

    async fn command(
        &mut self,
        address: u8,
        instruction: Instruction,
    ) -> Result<(), LcdError<B::Error>> {
        self.send(address, Mode::WriteInstruction, instruction.to_byte())?;
        if instruction.is_slow() {
            Timer::after(SLOW_INSTRUCTION_DELAY).await;
        }
        Ok(())
    }

    /// Re-send a no-op so the expander latches the current backlight bit
    fn latch_backlight(&mut self, address: u8) -> Result<(), LcdError<B::Error>> {
        self.send(address, Mode::WriteInstruction, NOOP)
    }

    /// Read one 8-bit value, high nibble first
    fn receive(&mut self, address: u8, mode: Mode) -> Result<u8, LcdError<B::Error>> {
        let high = self.receive_nibble(address, mode)?;
        let low = self.receive_nibble(address, mode)?;
        Ok(unnibble([high, low]))
    }

    /// Raise D4-D7 so the controller can drive them, pulse E and sample
    fn receive_nibble(&mut self, address: u8, mode: Mode) -> Result<u8, LcdError<B::Error>> {
        let idle = 0xF0 | mode.bits() | self.backlight.bits();
        self.bus
            .write(address, &[idle, idle | EN])
            .map_err(LcdError::BusReadFailed)?;

        let mut sample = [0u8];
        let read = self.bus.read(address, &mut sample);
        // E must drop even when the sample failed
        self.bus
            .write(address, &[idle])
            .map_err(LcdError::BusReadFailed)?;
        read.map_err(LcdError::BusReadFailed)?;

        Ok(sample[0])
    }
}

/// HD44780 character LCD behind a PCF8574 expander
pub struct Hd44780<B: I2cBus> {
    address: u8,
    inner: Mutex<CriticalSectionRawMutex, Inner<B>>,
}

impl<B: OpenI2cBus> Hd44780<B> {
    /// Acquire bus `line` and initialize the controller at `address`
    ///
    /// Only a failure to acquire the bus is fatal; see [`Hd44780::new`].
    pub async fn open(line: u8, address: u8) -> Result<Self, LcdError<B::Error>> {
        let bus = B::open(line).map_err(LcdError::BusOpenFailed)?;
        info!("LCD bus {} opened, controller at {:#04x}", line, address);
        Ok(Self::new(bus, address).await)
    }
}

impl<B: I2cBus> Hd44780<B> {
    /// Initialize the controller on an already acquired bus
    ///
    /// Initialization is best effort: a controller that does not
    /// acknowledge is logged, and the driver is returned anyway so later
    /// writes can still reach it.
    pub async fn new(bus: B, address: u8) -> Self {
        let lcd = Self {
            address,
            inner: Mutex::new(Inner {
                bus,
                backlight: Backlight::Off,
            }),
        };

        if let Err(e) = lcd.initialize().await {
            warn!("LCD initialization failed: {:?}", e);
        }
        lcd
    }

    async fn initialize(&self) -> Result<(), LcdError<B::Error>> {
        let mut inner = self.inner.lock().await;
        let address = self.address;

        Timer::after(POWER_UP_DELAY).await;
        inner.send_nibble(address, PRIMER_NIBBLE)?;
        Timer::after(PRIMER_DELAY).await;
        inner.send_nibble(address, PRIMER_NIBBLE)?;
        Timer::after(SHORT_PRIMER_DELAY).await;
        inner.send_nibble(address, PRIMER_NIBBLE)?;
        Timer::after(SHORT_PRIMER_DELAY).await;
        inner.send_nibble(address, FOUR_BIT_NIBBLE)?;
        Timer::after(SHORT_PRIMER_DELAY).await;

        let sequence = [
            Instruction::FunctionSet {
                eight_bit: false,
                two_line: true,
                large_font: false,
            },
            Instruction::DisplayControl {
                display: true,
                cursor: false,
                blink: false,
            },
            Instruction::ClearDisplay,
            Instruction::EntryModeSet {
                left_to_right: true,
                shift: false,
            },
        ];
        for instruction in sequence {
            inner.command(address, instruction).await?;
        }

        inner.backlight = Backlight::On;
        inner.latch_backlight(address)?;
        debug!("LCD initialized");
        Ok(())
    }

    /// I2C address of the expander
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Write `text` starting at column `offset` of a 1-based `line`
    ///
    /// Text is folded onto the controller's character ROM. An invalid
    /// line is rejected before anything reaches the bus.
    pub async fn show(&self, text: &str, line: u8, offset: u8) -> Result<(), LcdError<B::Error>> {
        let start = ddram_address(line, offset)?;

        let mut inner = self.inner.lock().await;
        inner
            .command(self.address, Instruction::SetDdramAddress(start))
            .await?;
        for byte in encode_str(text) {
            inner.send(self.address, Mode::WriteData, byte)?;
        }
        Ok(())
    }

    /// Switch the backlight and latch it immediately
    pub async fn set_backlight(&self, on: bool) -> Result<(), LcdError<B::Error>> {
        let mut inner = self.inner.lock().await;
        inner.backlight = Backlight::from(on);
        inner.latch_backlight(self.address)
    }

    /// Backlight state as last set
    pub async fn backlight(&self) -> bool {
        self.inner.lock().await.backlight.is_on()
    }

    /// Blank the display and home the cursor
    pub async fn clear(&self) -> Result<(), LcdError<B::Error>> {
        let mut inner = self.inner.lock().await;
        inner.command(self.address, Instruction::ClearDisplay).await
    }

    /// Home the cursor and undo any display shift
    pub async fn return_home(&self) -> Result<(), LcdError<B::Error>> {
        let mut inner = self.inner.lock().await;
        inner.command(self.address, Instruction::ReturnHome).await
    }

    /// Move the cursor, or scroll the whole display, one cell
    pub async fn shift(&self, display: bool, right: bool) -> Result<(), LcdError<B::Error>> {
        let mut inner = self.inner.lock().await;
        inner
            .command(self.address, Instruction::CursorShift { display, right })
            .await
    }

    /// Load a 5x8 glyph into character code `slot` (0-7)
    ///
    /// Only the low five bits of each row are used. The address counter is
    /// left in CGRAM; the next `show` moves it back to DDRAM.
    pub async fn define_char(&self, slot: u8, rows: [u8; 8]) -> Result<(), LcdError<B::Error>> {
        let mut inner = self.inner.lock().await;
        inner
            .command(self.address, Instruction::SetCgramAddress((slot & 0x07) << 3))
            .await?;
        for row in rows {
            inner.send(self.address, Mode::WriteData, row & 0x1F)?;
        }
        Ok(())
    }

    /// Read the busy flag and address counter
    pub async fn read_status(&self) -> Result<Status, LcdError<B::Error>> {
        let mut inner = self.inner.lock().await;
        inner
            .receive(self.address, Mode::ReadInstruction)
            .map(Status::from)
    }

    /// Read the DDRAM/CGRAM byte at the address counter
    pub async fn read_data(&self) -> Result<u8, LcdError<B::Error>> {
        let mut inner = self.inner.lock().await;
        inner.receive(self.address, Mode::ReadData)
    }

    /// Give the bus back without touching the display
    pub fn into_inner(self) -> B {
        self.inner.into_inner().bus
    }

    /// Clear, switch the backlight off and release the bus
    ///
    /// Every step is attempted; the first failure is returned.
    pub async fn close(self) -> Result<(), LcdError<B::Error>> {
        let cleared = self.clear().await;
        if let Err(e) = &cleared {
            warn!("LCD clear on close failed: {:?}", e);
        }
        let darkened = self.set_backlight(false).await;
        if let Err(e) = &darkened {
            warn!("LCD backlight off on close failed: {:?}", e);
        }

        drop(self.into_inner());
        info!("LCD closed");
        cleared.and(darkened)
    }
}

impl<B: I2cBus> LineDisplay for Hd44780<B> {
    type Error = LcdError<B::Error>;

    async fn show(&self, text: &str, line: u8, offset: u8) -> Result<(), Self::Error> {
        Hd44780::show(self, text, line, offset).await
    }

    async fn clear(&self) -> Result<(), Self::Error> {
        Hd44780::clear(self).await
    }

    async fn set_backlight(&self, on: bool) -> Result<(), Self::Error> {
        Hd44780::set_backlight(self, on).await
    }

    async fn close(self) -> Result<(), Self::Error> {
        Hd44780::close(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use std::collections::VecDeque;
    use std::vec::Vec;
    use trackline_protocol::decode;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Nack;

    /// Records every write and replays queued read samples
    #[derive(Default)]
    struct RecordingBus {
        writes: Vec<(u8, Vec<u8>)>,
        samples: VecDeque<u8>,
        fail_writes: bool,
    }

    impl RecordingBus {
        fn decoded(&self, from: usize) -> Vec<(Mode, u8, Backlight)> {
            self.writes[from..]
                .iter()
                .map(|(_, bytes)| {
                    let bytes: [u8; 6] = bytes.as_slice().try_into().unwrap();
                    decode(&bytes).unwrap()
                })
                .collect()
        }
    }

    impl I2cBus for RecordingBus {
        type Error = Nack;

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Nack> {
            if self.fail_writes {
                return Err(Nack);
            }
            self.writes.push((address, data.to_vec()));
            Ok(())
        }

        fn read(&mut self, _address: u8, buf: &mut [u8]) -> Result<(), Nack> {
            for b in buf.iter_mut() {
                *b = self.samples.pop_front().ok_or(Nack)?;
            }
            Ok(())
        }
    }

    impl OpenI2cBus for RecordingBus {
        fn open(line: u8) -> Result<Self, Nack> {
            if line == 1 {
                Ok(Self::default())
            } else {
                Err(Nack)
            }
        }
    }

    /// Writes issued by a successful cold start
    const INIT_WRITES: usize = 9;

    #[test]
    fn test_cold_start_sequence() {
        let lcd = block_on(Hd44780::new(RecordingBus::default(), 0x27));
        let bus = lcd.into_inner();

        assert_eq!(bus.writes.len(), INIT_WRITES);
        assert!(bus.writes.iter().all(|(addr, _)| *addr == 0x27));
        for (_, bytes) in &bus.writes[..3] {
            assert_eq!(bytes.as_slice(), &[0x30, 0x34, 0x30]);
        }
        assert_eq!(bus.writes[3].1.as_slice(), &[0x20, 0x24, 0x20]);

        let off = Backlight::Off;
        assert_eq!(
            bus.decoded(4),
            [
                (Mode::WriteInstruction, 0x28, off),
                (Mode::WriteInstruction, 0x0C, off),
                (Mode::WriteInstruction, 0x01, off),
                (Mode::WriteInstruction, 0x06, off),
                (Mode::WriteInstruction, 0x00, Backlight::On),
            ]
        );
    }

    #[test]
    fn test_show_on_second_line() {
        let lcd = block_on(Hd44780::new(RecordingBus::default(), 0x27));
        block_on(lcd.show("A", 2, 0)).unwrap();
        let bus = lcd.into_inner();

        let shown = &bus.writes[INIT_WRITES..];
        assert_eq!(shown.len(), 2);
        assert!(shown.iter().all(|(_, bytes)| bytes.len() == 6));
        assert_eq!(
            bus.decoded(INIT_WRITES),
            [
                (Mode::WriteInstruction, 0xC0, Backlight::On),
                (Mode::WriteData, 0x41, Backlight::On),
            ]
        );
    }

    #[test]
    fn test_show_offset_and_fourth_line() {
        let lcd = block_on(Hd44780::new(RecordingBus::default(), 0x27));
        block_on(lcd.show("ok", 4, 3)).unwrap();
        let bus = lcd.into_inner();

        let values: Vec<u8> = bus
            .decoded(INIT_WRITES)
            .into_iter()
            .map(|(_, v, _)| v)
            .collect();
        assert_eq!(values, [0x80 | 0x57, b'o', b'k']);
    }

    #[test]
    fn test_show_folds_characters() {
        let lcd = block_on(Hd44780::new(RecordingBus::default(), 0x27));
        block_on(lcd.show("é~", 1, 0)).unwrap();
        let bus = lcd.into_inner();

        let data: Vec<u8> = bus
            .decoded(INIT_WRITES + 1)
            .into_iter()
            .map(|(_, v, _)| v)
            .collect();
        assert_eq!(data, [b'e', b'-']);
    }

    #[test]
    fn test_invalid_line_sends_nothing() {
        let lcd = block_on(Hd44780::new(RecordingBus::default(), 0x27));
        assert_eq!(block_on(lcd.show("x", 5, 0)), Err(LcdError::InvalidLine(5)));
        assert_eq!(block_on(lcd.show("x", 0, 0)), Err(LcdError::InvalidLine(0)));
        assert_eq!(lcd.into_inner().writes.len(), INIT_WRITES);
    }

    #[test]
    fn test_backlight_is_latched_and_carried() {
        let lcd = block_on(Hd44780::new(RecordingBus::default(), 0x27));
        block_on(lcd.set_backlight(false)).unwrap();
        assert!(!block_on(lcd.backlight()));
        block_on(lcd.show("B", 1, 0)).unwrap();
        let bus = lcd.into_inner();

        assert_eq!(
            bus.decoded(INIT_WRITES),
            [
                (Mode::WriteInstruction, 0x00, Backlight::Off),
                (Mode::WriteInstruction, 0x80, Backlight::Off),
                (Mode::WriteData, b'B', Backlight::Off),
            ]
        );
    }

    #[test]
    fn test_shift_display_and_cursor() {
        let lcd = block_on(Hd44780::new(RecordingBus::default(), 0x27));
        block_on(lcd.shift(true, false)).unwrap();
        block_on(lcd.shift(false, true)).unwrap();
        let bus = lcd.into_inner();

        let values: Vec<u8> = bus
            .decoded(INIT_WRITES)
            .into_iter()
            .map(|(_, v, _)| v)
            .collect();
        assert_eq!(values, [0x18, 0x14]);
    }

    #[test]
    fn test_define_char_writes_cgram() {
        let lcd = block_on(Hd44780::new(RecordingBus::default(), 0x27));
        let note = [0x02, 0x03, 0x02, 0x02, 0x0E, 0x1E, 0xFC, 0x00];
        block_on(lcd.define_char(1, note)).unwrap();
        let bus = lcd.into_inner();

        let sent = bus.decoded(INIT_WRITES);
        assert_eq!(sent.len(), 9);
        assert_eq!(sent[0], (Mode::WriteInstruction, 0x48, Backlight::On));
        assert!(sent[1..].iter().all(|(mode, _, _)| *mode == Mode::WriteData));
        let rows: Vec<u8> = sent[1..].iter().map(|(_, v, _)| *v).collect();
        assert_eq!(rows, [0x02, 0x03, 0x02, 0x02, 0x0E, 0x1E, 0x1C, 0x00]);
    }

    #[test]
    fn test_clear_and_return_home() {
        let lcd = block_on(Hd44780::new(RecordingBus::default(), 0x27));
        block_on(lcd.clear()).unwrap();
        block_on(lcd.return_home()).unwrap();
        let bus = lcd.into_inner();

        let values: Vec<u8> = bus
            .decoded(INIT_WRITES)
            .into_iter()
            .map(|(_, v, _)| v)
            .collect();
        assert_eq!(values, [0x01, 0x02]);
    }

    #[test]
    fn test_close_clears_then_darkens() {
        let mut bus = RecordingBus::default();
        let lcd = block_on(Hd44780::new(&mut bus, 0x27));
        block_on(lcd.close()).unwrap();

        assert_eq!(
            bus.decoded(INIT_WRITES),
            [
                (Mode::WriteInstruction, 0x01, Backlight::On),
                (Mode::WriteInstruction, 0x00, Backlight::Off),
            ]
        );
    }

    #[test]
    fn test_failed_init_still_returns_driver() {
        let bus = RecordingBus {
            fail_writes: true,
            ..Default::default()
        };
        let lcd = block_on(Hd44780::new(bus, 0x27));
        assert_eq!(
            block_on(lcd.show("x", 1, 0)),
            Err(LcdError::BusWriteFailed(Nack))
        );
        assert_eq!(block_on(lcd.close()), Err(LcdError::BusWriteFailed(Nack)));
    }

    #[test]
    fn test_open_failure_is_reported() {
        let result = block_on(Hd44780::<RecordingBus>::open(7, 0x27));
        assert!(matches!(result, Err(LcdError::BusOpenFailed(Nack))));

        let lcd = block_on(Hd44780::<RecordingBus>::open(1, 0x3F)).unwrap();
        assert_eq!(lcd.address(), 0x3F);
        assert_eq!(lcd.into_inner().writes.len(), INIT_WRITES);
    }

    #[test]
    fn test_read_status() {
        let mut bus = RecordingBus::default();
        bus.samples.extend([0x80, 0x50]);
        let lcd = block_on(Hd44780::new(bus, 0x27));

        let status = block_on(lcd.read_status()).unwrap();
        assert_eq!(
            status,
            Status {
                busy: true,
                address_counter: 0x05,
            }
        );

        let bus = lcd.into_inner();
        let strobes: Vec<&[u8]> = bus.writes[INIT_WRITES..]
            .iter()
            .map(|(_, b)| b.as_slice())
            .collect();
        assert_eq!(
            strobes,
            [
                &[0xFAu8, 0xFE][..],
                &[0xFA][..],
                &[0xFA, 0xFE][..],
                &[0xFA][..],
            ]
        );
    }

    #[test]
    fn test_read_data_and_failure() {
        let mut bus = RecordingBus::default();
        bus.samples.extend([0x40, 0x10]);
        let lcd = block_on(Hd44780::new(bus, 0x27));

        assert_eq!(block_on(lcd.read_data()), Ok(0x41));
        // Nothing left to sample
        assert_eq!(block_on(lcd.read_data()), Err(LcdError::BusReadFailed(Nack)));
    }

    #[test]
    fn test_error_display() {
        let err: LcdError<Nack> = LcdError::InvalidLine(9);
        assert_eq!(std::format!("{}", err), "line 9 is not valid");
    }
}
