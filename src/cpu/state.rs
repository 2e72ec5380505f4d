/*!
state.rs - 6502 architectural state (registers + flags).

Overview
========
`CpuState` owns every architecturally visible register. It deliberately
excludes bus access, decode and timing; those live in `addressing`,
`dispatch` and `table`.

Power-up and reset both leave the register file zeroed. The RESET
interrupt (see `dispatch::service_interrupt`) is what loads the program
counter from the vector and moves SP to its conventional 0xFD.

6502 Status Register Bit Layout
===============================
Bit: 7 6 5 4 3 2 1 0
     N V 1 B D I Z C
Where:
  N = NEGATIVE
  V = OVERFLOW
  1 = UNUSED (always reported set)
  B = BREAK (set in the pushed copy for PHP/BRK only)
  D = DECIMAL (tracked, never interpreted)
  I = IRQ_DISABLE
  Z = ZERO
  C = CARRY
*/

/// Processor status flag bit masks.
pub const CARRY: u8 = 0b0000_0001;
pub const ZERO: u8 = 0b0000_0010;
pub const IRQ_DISABLE: u8 = 0b0000_0100;
pub const DECIMAL: u8 = 0b0000_1000;
pub const BREAK: u8 = 0b0001_0000;
pub const UNUSED: u8 = 0b0010_0000;
pub const OVERFLOW: u8 = 0b0100_0000;
pub const NEGATIVE: u8 = 0b1000_0000;

/// All eight flag masks, lowest bit first.
pub const ALL_FLAGS: [u8; 8] = [
    CARRY,
    ZERO,
    IRQ_DISABLE,
    DECIMAL,
    BREAK,
    UNUSED,
    OVERFLOW,
    NEGATIVE,
];

/// Base address of the hardware stack page.
pub const STACK_PAGE: u16 = 0x0100;

/// Interrupt vectors (little-endian pointers).
pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Register file of the 6502.
///
/// Fields are public for tests and snapshots; instruction code goes
/// through the `CpuRegs` trait.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuState {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
}

impl CpuState {
    /// Create a zeroed register file.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every register. Equivalent to construction.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // ---------------------------------------------------------------------
    // Basic Accessors (Read)
    // ---------------------------------------------------------------------
    #[inline]
    pub fn a(&self) -> u8 {
        self.a
    }
    #[inline]
    pub fn x(&self) -> u8 {
        self.x
    }
    #[inline]
    pub fn y(&self) -> u8 {
        self.y
    }
    #[inline]
    pub fn sp(&self) -> u8 {
        self.sp
    }
    #[inline]
    pub fn pc(&self) -> u16 {
        self.pc
    }
    #[inline]
    pub fn status(&self) -> u8 {
        self.status
    }

    // ---------------------------------------------------------------------
    // Mutators (Write)
    // ---------------------------------------------------------------------
    #[inline]
    pub fn set_a(&mut self, v: u8) {
        self.a = v;
    }
    #[inline]
    pub fn set_x(&mut self, v: u8) {
        self.x = v;
    }
    #[inline]
    pub fn set_y(&mut self, v: u8) {
        self.y = v;
    }
    #[inline]
    pub fn set_sp(&mut self, v: u8) {
        self.sp = v;
    }
    #[inline]
    pub fn set_pc(&mut self, v: u16) {
        self.pc = v;
    }
    #[inline]
    pub fn set_status(&mut self, v: u8) {
        self.status = v;
    }

    /// Advance PC by `delta` (wrapping at 16 bits).
    #[inline]
    pub fn advance_pc(&mut self, delta: u16) {
        self.pc = self.pc.wrapping_add(delta);
    }

    // ---------------------------------------------------------------------
    // Flag Operations
    // ---------------------------------------------------------------------

    /// Return true if a status flag (bit mask) is set.
    #[inline]
    pub fn is_flag_set(&self, mask: u8) -> bool {
        (self.status & mask) != 0
    }

    /// Assign a flag bit based on boolean `value`.
    #[inline]
    pub fn assign_flag(&mut self, mask: u8, value: bool) {
        if value {
            self.status |= mask;
        } else {
            self.status &= !mask;
        }
    }

    /// Status byte as software observes it: UNUSED always reads as 1.
    #[inline]
    pub fn reported_status(&self) -> u8 {
        self.status | UNUSED
    }
}
