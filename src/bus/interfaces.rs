/*!
interfaces: the hook trait peripheral register windows are bound through.

The bus routes every access inside a register window (TIA, RIOT, PPU,
APU/IO) to the `RegisterWindow` bound for it, passing the register offset
after mirroring. A window with no hook bound reads `STUB_READ` and ignores
writes, which is how the core runs without any video or audio model.

`LatchedRegisters` is a ready-made hook that simply stores what is written
and returns it on read; it is handy for tests and for probing what a
program writes to its peripherals.
*/

/// Value returned by a register window with no hook bound.
pub const STUB_READ: u8 = 0x00;

/// Peripheral register window.
pub trait RegisterWindow {
    /// Read the register at `offset` (already folded into the window).
    /// Takes `&mut self` since reads of real registers have side effects.
    fn read(&mut self, offset: u16) -> u8;

    fn write(&mut self, offset: u16, value: u8);

    /// Called from `Bus::reset`.
    fn reset(&mut self) {}

    /// Level of this peripheral's IRQ output.
    fn irq_asserted(&self) -> bool {
        false
    }
}

/// Plain register bank: reads return the last value written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatchedRegisters {
    regs: Vec<u8>,
}

impl LatchedRegisters {
    pub fn new(size: usize) -> Self {
        Self {
            regs: vec![0; size],
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.regs
    }
}

impl RegisterWindow for LatchedRegisters {
    fn read(&mut self, offset: u16) -> u8 {
        self.regs.get(offset as usize).copied().unwrap_or(STUB_READ)
    }

    fn write(&mut self, offset: u16, value: u8) {
        if let Some(r) = self.regs.get_mut(offset as usize) {
            *r = value;
        }
    }

    fn reset(&mut self) {
        self.regs.fill(0);
    }
}
