//! Recording mocks shared by the unit tests
//!
//! The SPI bus, every pin and the delay push into one ordered event log so
//! tests can check both the bytes on the wire and how they were framed.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, SpiBus};

use crate::config::Config;
use crate::display::Display;
use crate::interface::Interface;

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Pin(&'static str, bool),
    Write(Vec<u8>),
    Flush,
    DelayMs(u32),
    DelayNs(u32),
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

#[derive(Debug)]
pub struct MockSpi {
    log: EventLog,
    fail_after: Option<usize>,
    writes: usize,
}

impl MockSpi {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            fail_after: None,
            writes: 0,
        }
    }

    /// Every write from the `n`th (zero-based) onwards fails
    pub fn failing_after(log: &EventLog, n: usize) -> Self {
        Self {
            log: log.clone(),
            fail_after: Some(n),
            writes: 0,
        }
    }
}

impl spi::ErrorType for MockSpi {
    type Error = spi::ErrorKind;
}

impl SpiBus for MockSpi {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        let index = self.writes;
        self.writes += 1;
        if self.fail_after.is_some_and(|n| index >= n) {
            return Err(spi::ErrorKind::Other);
        }
        self.log.borrow_mut().push(Event::Write(words.to_vec()));
        Ok(())
    }

    fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Flush);
        Ok(())
    }
}

#[derive(Debug)]
pub struct MockPin {
    name: &'static str,
    log: EventLog,
    fail_low: bool,
    fail_high: bool,
}

impl MockPin {
    pub fn new(name: &'static str, log: &EventLog) -> Self {
        Self {
            name,
            log: log.clone(),
            fail_low: false,
            fail_high: false,
        }
    }

    /// A pin whose every write fails
    pub fn broken(name: &'static str, log: &EventLog) -> Self {
        Self {
            fail_low: true,
            fail_high: true,
            ..Self::new(name, log)
        }
    }

    /// A pin that can be driven low but not high
    pub fn failing_high(name: &'static str, log: &EventLog) -> Self {
        Self {
            fail_high: true,
            ..Self::new(name, log)
        }
    }

    /// A pin that can be driven high but not low
    pub fn failing_low(name: &'static str, log: &EventLog) -> Self {
        Self {
            fail_low: true,
            ..Self::new(name, log)
        }
    }

    fn record(&mut self, high: bool) -> Result<(), digital::ErrorKind> {
        if (high && self.fail_high) || (!high && self.fail_low) {
            return Err(digital::ErrorKind::Other);
        }
        self.log.borrow_mut().push(Event::Pin(self.name, high));
        Ok(())
    }
}

impl digital::ErrorType for MockPin {
    type Error = digital::ErrorKind;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.record(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.record(true)
    }
}

pub struct MockDelay {
    log: EventLog,
}

impl MockDelay {
    pub fn new(log: &EventLog) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::DelayNs(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ms));
    }
}

/// Fully wired interface over the recording mocks
pub type MockInterface = Interface<MockSpi, MockPin, MockPin, MockPin, MockPin>;

pub fn mock_interface(log: &EventLog) -> MockInterface {
    Interface::new(MockSpi::new(log))
        .with_dc(MockPin::new("dc", log))
        .with_cs(MockPin::new("cs", log))
        .with_reset(MockPin::new("rst", log))
        .with_backlight(MockPin::new("bl", log))
}

pub fn mock_display(log: &EventLog) -> Display<MockInterface> {
    Display::new(mock_interface(log), Config::default_240x240())
}

/// A decoded bus transfer
#[derive(Clone, Debug, PartialEq)]
pub enum Transfer {
    Command(u8),
    Data(Vec<u8>),
}

/// Decode the bus writes in `log` using the DC level in force at each write
pub fn transfers(log: &EventLog) -> Vec<Transfer> {
    let mut dc_high = true;
    let mut out = Vec::new();
    for event in log.borrow().iter() {
        match event {
            Event::Pin("dc", level) => dc_high = *level,
            Event::Write(bytes) if dc_high => out.push(Transfer::Data(bytes.clone())),
            Event::Write(bytes) => {
                assert_eq!(bytes.len(), 1, "command phase carried {} bytes", bytes.len());
                out.push(Transfer::Command(bytes[0]));
            }
            _ => {}
        }
    }
    out
}

/// Just the command bytes, in order
pub fn commands(log: &EventLog) -> Vec<u8> {
    transfers(log)
        .into_iter()
        .filter_map(|t| match t {
            Transfer::Command(cmd) => Some(cmd),
            Transfer::Data(_) => None,
        })
        .collect()
}

/// Check that every write sits alone inside its own CS low/high window and
/// that DC never moves while CS is low
pub fn assert_framed(log: &EventLog) {
    let mut selected = false;
    let mut writes_in_window = 0;
    for event in log.borrow().iter() {
        match event {
            Event::Pin("cs", false) => {
                assert!(!selected, "CS asserted twice");
                selected = true;
                writes_in_window = 0;
            }
            Event::Pin("cs", true) => {
                assert!(selected, "CS released while not asserted");
                assert_eq!(writes_in_window, 1, "CS window without exactly one transfer");
                selected = false;
            }
            Event::Pin("dc", _) => assert!(!selected, "DC changed while CS low"),
            Event::Write(_) => {
                assert!(selected, "write outside a CS window");
                writes_in_window += 1;
            }
            _ => {}
        }
    }
    assert!(!selected, "CS left asserted");
}
