/*!
addressing.rs - 6502 operand fetch and effective address helpers.

Overview
========
Provides the canonical helpers for:
- Instruction stream byte/word fetch
- Effective address calculation for all 13 addressing modes
- Emulation of the 6502 JMP (indirect) page-wrap quirk
- `resolve`, which turns a `Mode` into an `Operand` for the executor

Scope & Responsibilities
========================
- Pure address / operand resolution. No cycle accounting: indexed modes
  carry no page-cross penalty, the table's base cost is final.
- Zero-page indexed modes wrap within page 0 (8-bit add). Absolute
  indexed modes wrap at 16 bits.
- Public so callers can probe operand resolution directly.

Caller Assumptions
==================
- PC points at the next unread instruction byte when a fetch helper is
  invoked (i.e. the opcode has already been consumed).
- Each helper consumes exactly the operand bytes of its mode, so the PC
  after `resolve` points at the next opcode.
*/

use crate::bus::Bus;
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Mode;

/// A resolved operand, ready for the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// No operand (register-only and stack instructions).
    Implied,
    /// The accumulator is both source and destination.
    Accumulator,
    /// Literal byte taken from the instruction stream.
    Immediate(u8),
    /// Effective address in the 16-bit space.
    Address(u16),
    /// Signed branch displacement relative to the PC after the operand.
    Relative(i8),
}

/// Fetch next byte from the instruction stream, incrementing PC.
pub fn fetch_byte<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u8 {
    let pc = cpu.pc();
    let v = bus.read(pc);
    cpu.advance_pc_one();
    v
}

/// Fetch next little-endian word (low, then high), incrementing PC twice.
pub fn fetch_word<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u16 {
    let lo = fetch_byte(cpu, bus) as u16;
    let hi = fetch_byte(cpu, bus) as u16;
    (hi << 8) | lo
}

// -------------------------
// Basic addressing helpers
// -------------------------

#[inline]
pub fn addr_zp<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u16 {
    fetch_byte(cpu, bus) as u16
}

#[inline]
pub fn addr_zp_x<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u16 {
    fetch_byte(cpu, bus).wrapping_add(cpu.x()) as u16
}

#[inline]
pub fn addr_zp_y<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u16 {
    fetch_byte(cpu, bus).wrapping_add(cpu.y()) as u16
}

#[inline]
pub fn addr_abs<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u16 {
    fetch_word(cpu, bus)
}

#[inline]
pub fn addr_abs_x<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u16 {
    fetch_word(cpu, bus).wrapping_add(cpu.x() as u16)
}

#[inline]
pub fn addr_abs_y<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u16 {
    fetch_word(cpu, bus).wrapping_add(cpu.y() as u16)
}

/// JMP (indirect): the pointer is a full 16-bit address.
#[inline]
pub fn addr_ind<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u16 {
    let ptr = fetch_word(cpu, bus);
    read_word_indirect_bug(bus, ptr)
}

/// (zp,X): pointer at `operand + X` in page 0.
#[inline]
pub fn addr_ind_x<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u16 {
    let zp = fetch_byte(cpu, bus).wrapping_add(cpu.x());
    read_word_zp(bus, zp)
}

/// (zp),Y: pointer at `operand` in page 0, then `+ Y`.
#[inline]
pub fn addr_ind_y<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u16 {
    let zp = fetch_byte(cpu, bus);
    read_word_zp(bus, zp).wrapping_add(cpu.y() as u16)
}

/// Consume the operand bytes of `mode` and produce the operand.
pub fn resolve<C: CpuRegs>(cpu: &mut C, bus: &mut Bus, mode: Mode) -> Operand {
    match mode {
        Mode::Implied => Operand::Implied,
        Mode::Accumulator => Operand::Accumulator,
        Mode::Immediate => Operand::Immediate(fetch_byte(cpu, bus)),
        Mode::ZeroPage => Operand::Address(addr_zp(cpu, bus)),
        Mode::ZeroPageX => Operand::Address(addr_zp_x(cpu, bus)),
        Mode::ZeroPageY => Operand::Address(addr_zp_y(cpu, bus)),
        Mode::Absolute => Operand::Address(addr_abs(cpu, bus)),
        Mode::AbsoluteX => Operand::Address(addr_abs_x(cpu, bus)),
        Mode::AbsoluteY => Operand::Address(addr_abs_y(cpu, bus)),
        Mode::Indirect => Operand::Address(addr_ind(cpu, bus)),
        Mode::IndexedIndirect => Operand::Address(addr_ind_x(cpu, bus)),
        Mode::IndirectIndexed => Operand::Address(addr_ind_y(cpu, bus)),
        Mode::Relative => Operand::Relative(fetch_byte(cpu, bus) as i8),
    }
}

/// Read the value an operand denotes.
#[inline]
pub fn load<C: CpuRegs>(cpu: &C, bus: &mut Bus, operand: Operand) -> u8 {
    match operand {
        Operand::Immediate(v) => v,
        Operand::Address(addr) => bus.read(addr),
        Operand::Accumulator => cpu.a(),
        Operand::Implied | Operand::Relative(_) => {
            debug_assert!(false, "operand {operand:?} has no value");
            0
        }
    }
}

/// Write to the location an operand denotes.
#[inline]
pub fn store<C: CpuRegs>(cpu: &mut C, bus: &mut Bus, operand: Operand, value: u8) {
    match operand {
        Operand::Address(addr) => bus.write(addr, value),
        Operand::Accumulator => cpu.set_a(value),
        _ => debug_assert!(false, "operand {operand:?} is not writable"),
    }
}

// -------------------------
// Low-level word helpers
// -------------------------

/// Read a 16-bit little endian pointer from zero page with wraparound
/// on the high byte.
#[inline]
pub fn read_word_zp(bus: &mut Bus, base: u8) -> u16 {
    let lo = bus.read(base as u16) as u16;
    let hi = bus.read(base.wrapping_add(1) as u16) as u16;
    (hi << 8) | lo
}

/// 6502 JMP (indirect) quirk: when the pointer's low byte is 0xFF the
/// high byte is read from the start of the same page.
#[inline]
pub fn read_word_indirect_bug(bus: &mut Bus, addr: u16) -> u16 {
    let lo = bus.read(addr) as u16;
    let hi_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
    let hi = bus.read(hi_addr) as u16;
    (hi << 8) | lo
}
