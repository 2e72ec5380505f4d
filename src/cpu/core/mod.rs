/*!
core::Cpu - 6502 CPU facade wrapping `CpuState`.

Design
======
- `Cpu` stores a single field, `state: CpuState`. Construction and
  `reset` both produce the zeroed register file; delivering
  `Interrupt::Reset` is what brings the CPU to its run state.
- `step` executes exactly one instruction through the generic dispatcher
  and reports a `StepOutcome`.
- Interrupts are delivered between instructions, either explicitly with
  `interrupt` or from the bus lines with `poll_interrupts`.
- Stack push/pull are exposed for callers that seed or inspect the stack.

Flags
=====
`get_flag` / `set_flag` are a raw view over single status bits, so any
value written reads back unchanged. `status()` is the byte as software
would observe it, with the UNUSED bit forced on.
*/

#[cfg(feature = "trace")]
use log::trace;

#[cfg(feature = "trace")]
use crate::cpu::table::disassemble;

use crate::bus::Bus;
use crate::cpu::dispatch::{self, Interrupt, StepOutcome};
use crate::cpu::execute;
use crate::cpu::state::{CpuState, UNUSED};

#[derive(Debug, Clone, Default)]
pub struct Cpu {
    state: CpuState,
}

impl Cpu {
    /// Construct a CPU with every register zeroed.
    pub fn new() -> Self {
        Self {
            state: CpuState::new(),
        }
    }

    /// Return immutable reference to internal state (for inspection / testing).
    pub fn state(&self) -> &CpuState {
        &self.state
    }

    /// Return mutable reference to internal state.
    pub fn state_mut(&mut self) -> &mut CpuState {
        &mut self.state
    }

    /// Zero every register. Does not touch the bus.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    // ---------------------------------------------------------------------
    // Register accessors (read)
    // ---------------------------------------------------------------------
    pub fn a(&self) -> u8 {
        self.state.a
    }
    pub fn x(&self) -> u8 {
        self.state.x
    }
    pub fn y(&self) -> u8 {
        self.state.y
    }
    pub fn sp(&self) -> u8 {
        self.state.sp
    }
    pub fn pc(&self) -> u16 {
        self.state.pc
    }
    /// Status byte as observed by software (UNUSED always set).
    pub fn status(&self) -> u8 {
        self.state.status | UNUSED
    }

    // ---------------------------------------------------------------------
    // Register mutators (write)
    // ---------------------------------------------------------------------
    pub fn set_a(&mut self, v: u8) {
        self.state.a = v;
    }
    pub fn set_x(&mut self, v: u8) {
        self.state.x = v;
    }
    pub fn set_y(&mut self, v: u8) {
        self.state.y = v;
    }
    pub fn set_sp(&mut self, v: u8) {
        self.state.sp = v;
    }
    pub fn set_pc(&mut self, v: u16) {
        self.state.pc = v;
    }
    pub fn set_status(&mut self, v: u8) {
        self.state.status = v;
    }

    // ---------------------------------------------------------------------
    // Flag helpers
    // ---------------------------------------------------------------------
    pub fn set_flag(&mut self, mask: u8, on: bool) {
        self.state.assign_flag(mask, on);
    }

    pub fn get_flag(&self, mask: u8) -> bool {
        self.state.is_flag_set(mask)
    }

    // ---------------------------------------------------------------------
    // Stack
    // ---------------------------------------------------------------------
    pub fn push(&mut self, bus: &mut Bus, v: u8) {
        execute::push(&mut self.state, bus, v);
    }

    pub fn pull(&mut self, bus: &mut Bus) -> u8 {
        execute::pull(&mut self.state, bus)
    }

    pub fn push_word(&mut self, bus: &mut Bus, v: u16) {
        execute::push_word(&mut self.state, bus, v);
    }

    pub fn pull_word(&mut self, bus: &mut Bus) -> u16 {
        execute::pull_word(&mut self.state, bus)
    }

    // ---------------------------------------------------------------------
    // Execution
    // ---------------------------------------------------------------------

    /// Execute one instruction.
    pub fn step(&mut self, bus: &mut Bus) -> StepOutcome {
        #[cfg(feature = "trace")]
        let before = self.state;

        let outcome = dispatch::step(&mut self.state, bus);

        #[cfg(feature = "trace")]
        trace!(
            "{:04X}  {:02X} {}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}  +{}",
            before.pc,
            outcome.opcode(),
            disassemble(outcome.opcode()),
            before.a,
            before.x,
            before.y,
            before.reported_status(),
            before.sp,
            outcome.cycles()
        );

        outcome
    }

    /// Deliver an interrupt now. Returns the cycles consumed, or `None`
    /// when an IRQ is masked.
    pub fn interrupt(&mut self, bus: &mut Bus, kind: Interrupt) -> Option<u32> {
        dispatch::service_interrupt(&mut self.state, bus, kind)
    }

    /// Take the highest-priority pending interrupt from the bus lines
    /// (RESET > NMI > IRQ), if any.
    pub fn poll_interrupts(&mut self, bus: &mut Bus) -> Option<(Interrupt, u32)> {
        dispatch::poll(&mut self.state, bus)
    }

    /// Execute up to `max_instructions` and return the cycles consumed.
    /// Illegal opcodes are skipped and cost nothing.
    pub fn run(&mut self, bus: &mut Bus, max_instructions: usize) -> u64 {
        (0..max_instructions)
            .map(|_| self.step(bus).cycles() as u64)
            .sum()
    }
}
