/*!
dispatch - Orchestrator for a single 6502 instruction step and for
interrupt entry.

Overview
========
`step` performs one atomic fetch/decode/execute:
1. Fetch the opcode at PC and advance PC by one.
2. Look the opcode up in `table::OPCODES`.
3. `Illegal`: report `StepOutcome::Illegal`; nothing else changes.
4. Otherwise resolve the operand for the descriptor's mode (consuming the
   operand bytes) and hand the operation to the family handler chain.
5. Report the descriptor's base cycle cost.

Family Handlers
===============
Each family module exposes `handle(op, operand, cpu, bus) -> bool`,
returning false for operations outside its family. Every `Operation`
belongs to exactly one family; `all_operations_have_a_family` checks it.

Interrupts
==========
`service_interrupt` implements RESET, NMI and IRQ entry. `poll` applies
the priority RESET > NMI > IRQ over the bus interrupt lines. Interrupts
are only examined between instructions.
*/

use log::debug;

use crate::bus::Bus;
use crate::cpu::addressing::{Operand, resolve};
use crate::cpu::execute::{get_flag, push_status, push_word, set_flag};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{IRQ_DISABLE, IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
use crate::cpu::table::{Instruction, Operation, lookup};

pub(crate) mod arithmetic;
pub(crate) mod branches;
pub(crate) mod compare;
pub(crate) mod control_flow;
pub(crate) mod load_store;
pub(crate) mod logical;
pub(crate) mod misc;
pub(crate) mod rmw;

/// Cycle cost of every interrupt entry sequence.
pub const INTERRUPT_CYCLES: u32 = 7;

/// Result of executing one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A documented opcode ran to completion.
    Executed { opcode: u8, cycles: u32 },
    /// The opcode byte has no documented meaning. PC moved past it and
    /// nothing else changed.
    Illegal { opcode: u8 },
}

impl StepOutcome {
    pub fn opcode(&self) -> u8 {
        match *self {
            StepOutcome::Executed { opcode, .. } | StepOutcome::Illegal { opcode } => opcode,
        }
    }

    /// Cycles consumed; zero for an illegal opcode.
    pub fn cycles(&self) -> u32 {
        match *self {
            StepOutcome::Executed { cycles, .. } => cycles,
            StepOutcome::Illegal { .. } => 0,
        }
    }

    pub fn is_illegal(&self) -> bool {
        matches!(self, StepOutcome::Illegal { .. })
    }
}

/// Asynchronous events that redirect execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    Reset,
    Nmi,
    Irq,
}

impl Interrupt {
    pub fn vector(self) -> u16 {
        match self {
            Interrupt::Reset => RESET_VECTOR,
            Interrupt::Nmi => NMI_VECTOR,
            Interrupt::Irq => IRQ_VECTOR,
        }
    }
}

/// Execute one instruction.
pub(crate) fn step<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> StepOutcome {
    let pc = cpu.pc();
    let opcode = bus.read(pc);
    cpu.advance_pc_one();

    let desc = match lookup(opcode) {
        Instruction::Op(desc) => desc,
        Instruction::Illegal => {
            debug!("illegal opcode ${opcode:02X} at ${pc:04X}");
            return StepOutcome::Illegal { opcode };
        }
    };

    let operand = resolve(cpu, bus, desc.mode);
    debug_assert_eq!(cpu.pc(), pc.wrapping_add(desc.len()), "{opcode:02X} operand length");
    execute(desc.operation, operand, cpu, bus);
    StepOutcome::Executed {
        opcode,
        cycles: desc.cycles,
    }
}

/// Route an operation to its family handler.
pub(crate) fn execute<C: CpuRegs>(op: Operation, operand: Operand, cpu: &mut C, bus: &mut Bus) {
    let handled = load_store::handle(op, operand, cpu, bus)
        || logical::handle(op, operand, cpu, bus)
        || arithmetic::handle(op, operand, cpu, bus)
        || compare::handle(op, operand, cpu, bus)
        || branches::handle(op, operand, cpu, bus)
        || rmw::handle(op, operand, cpu, bus)
        || control_flow::handle(op, operand, cpu, bus)
        || misc::handle(op, operand, cpu, bus);
    debug_assert!(handled, "{op} has no family handler");
}

/// Enter an interrupt. Returns the cycles consumed, or `None` when an
/// IRQ is masked by the I flag.
///
/// RESET performs no stack writes: SP drops by three (the suppressed
/// pushes), I is set and PC is loaded from the reset vector. NMI and IRQ
/// push PC, then status with B clear, set I and load their vector.
pub(crate) fn service_interrupt<C: CpuRegs>(
    cpu: &mut C,
    bus: &mut Bus,
    kind: Interrupt,
) -> Option<u32> {
    match kind {
        Interrupt::Reset => {
            cpu.set_sp(cpu.sp().wrapping_sub(3));
        }
        Interrupt::Irq if get_flag(cpu, IRQ_DISABLE) => return None,
        Interrupt::Nmi | Interrupt::Irq => {
            let pc = cpu.pc();
            push_word(cpu, bus, pc);
            push_status(cpu, bus, false);
        }
    }
    set_flag(cpu, IRQ_DISABLE, true);
    let target = bus.read_word(kind.vector());
    debug!("{kind:?} taken, vector ${target:04X}");
    cpu.set_pc(target);
    Some(INTERRUPT_CYCLES)
}

/// Service the highest-priority pending interrupt line, clearing the
/// latched RESET / NMI line it consumes. IRQ is level-triggered and is
/// left for the source to release.
pub(crate) fn poll<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> Option<(Interrupt, u32)> {
    if bus.interrupts.reset {
        bus.interrupts.reset = false;
        return service_interrupt(cpu, bus, Interrupt::Reset).map(|c| (Interrupt::Reset, c));
    }
    if bus.interrupts.nmi {
        bus.interrupts.nmi = false;
        return service_interrupt(cpu, bus, Interrupt::Nmi).map(|c| (Interrupt::Nmi, c));
    }
    if bus.irq_asserted() {
        return service_interrupt(cpu, bus, Interrupt::Irq).map(|c| (Interrupt::Irq, c));
    }
    None
}
