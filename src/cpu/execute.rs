/*!
execute.rs - 6502 instruction semantic helpers (ALU, flags, stack, RMW)

Purpose
=======
Side-effect logic for every documented instruction, shared by the family
handlers in `dispatch`. Helpers are generic over `CpuRegs`; the ones that
touch memory take the bus explicitly.

Scope (crate-visible)
---------------------
Flag helpers:
    set_flag, get_flag, update_zn

Stack helpers:
    push, pull, push_word, pull_word, push_status
    php, plp, pha, pla

Loads / transfers:
    lda/ldx/ldy, tax/tay/txa/tya, tsx/txs

ALU:
    and/ora/eor/bit, adc/sbc, compare
    inx/iny/dex/dey

Shifts / rotates / INC / DEC:
    asl/lsr/rol/ror are value transforms applied through `modify`,
    which targets either the accumulator or a memory operand.

Branches:
    branch

Flag rules
==========
- N from bit 7 of the result, Z from result == 0.
- ADC carry is the ninth bit of the sum; SBC and compares set C when no
  borrow occurs (minuend >= subtrahend).
- Overflow for ADC/SBC is signed overflow of the 8-bit result.
- The decimal flag is never consulted; arithmetic is always binary.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{Operand, load, store};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{BREAK, CARRY, NEGATIVE, OVERFLOW, STACK_PAGE, UNUSED, ZERO};

// ---------------------------------------------------------------------------
// Flag helpers
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn set_flag<C: CpuRegs>(cpu: &mut C, mask: u8, on: bool) {
    cpu.assign_flag(mask, on);
}

#[inline]
pub(crate) fn get_flag<C: CpuRegs>(cpu: &C, mask: u8) -> bool {
    cpu.is_flag_set(mask)
}

#[inline]
pub(crate) fn update_zn<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.update_zn(v);
}

// ---------------------------------------------------------------------------
// Stack helpers
// ---------------------------------------------------------------------------

/// Write to `0x0100 | SP`, then decrement SP (wrapping inside page 1).
#[inline]
pub(crate) fn push<C: CpuRegs>(cpu: &mut C, bus: &mut Bus, v: u8) {
    let sp = cpu.sp();
    bus.write(STACK_PAGE | sp as u16, v);
    cpu.set_sp(sp.wrapping_sub(1));
}

/// Increment SP (wrapping inside page 1), then read `0x0100 | SP`.
#[inline]
pub(crate) fn pull<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u8 {
    let sp = cpu.sp().wrapping_add(1);
    cpu.set_sp(sp);
    bus.read(STACK_PAGE | sp as u16)
}

/// High byte first, so the low byte ends up at the lower address.
#[inline]
pub(crate) fn push_word<C: CpuRegs>(cpu: &mut C, bus: &mut Bus, v: u16) {
    push(cpu, bus, (v >> 8) as u8);
    push(cpu, bus, (v & 0xFF) as u8);
}

#[inline]
pub(crate) fn pull_word<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u16 {
    let lo = pull(cpu, bus) as u16;
    let hi = pull(cpu, bus) as u16;
    (hi << 8) | lo
}

/// Push P with control over Break flag semantics (BRK/PHP vs IRQ/NMI).
pub(crate) fn push_status<C: CpuRegs>(cpu: &mut C, bus: &mut Bus, set_break: bool) {
    let v = cpu.compose_status_for_push(set_break);
    push(cpu, bus, v);
}

/// Pull P as PLP / RTI do: B dropped, U forced.
pub(crate) fn pull_status<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) {
    let v = pull(cpu, bus);
    cpu.set_status((v | UNUSED) & !BREAK);
}

#[inline]
pub(crate) fn php<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) {
    push_status(cpu, bus, true);
}

#[inline]
pub(crate) fn plp<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) {
    pull_status(cpu, bus);
}

#[inline]
pub(crate) fn pha<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) {
    let a = cpu.a();
    push(cpu, bus, a);
}

#[inline]
pub(crate) fn pla<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) {
    let val = pull(cpu, bus);
    cpu.set_a(val);
    update_zn(cpu, val);
}

// ---------------------------------------------------------------------------
// Loads / Transfers
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn lda<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.set_a(v);
    update_zn(cpu, v);
}

#[inline]
pub(crate) fn ldx<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.set_x(v);
    update_zn(cpu, v);
}

#[inline]
pub(crate) fn ldy<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.set_y(v);
    update_zn(cpu, v);
}

#[inline]
pub(crate) fn tax<C: CpuRegs>(cpu: &mut C) {
    ldx(cpu, cpu.a());
}

#[inline]
pub(crate) fn tay<C: CpuRegs>(cpu: &mut C) {
    ldy(cpu, cpu.a());
}

#[inline]
pub(crate) fn txa<C: CpuRegs>(cpu: &mut C) {
    lda(cpu, cpu.x());
}

#[inline]
pub(crate) fn tya<C: CpuRegs>(cpu: &mut C) {
    lda(cpu, cpu.y());
}

#[inline]
pub(crate) fn tsx<C: CpuRegs>(cpu: &mut C) {
    ldx(cpu, cpu.sp());
}

/// The one transfer that leaves the flags alone.
#[inline]
pub(crate) fn txs<C: CpuRegs>(cpu: &mut C) {
    cpu.set_sp(cpu.x());
}

// ---------------------------------------------------------------------------
// Logical / Bit
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn and<C: CpuRegs>(cpu: &mut C, v: u8) {
    lda(cpu, cpu.a() & v);
}

#[inline]
pub(crate) fn ora<C: CpuRegs>(cpu: &mut C, v: u8) {
    lda(cpu, cpu.a() | v);
}

#[inline]
pub(crate) fn eor<C: CpuRegs>(cpu: &mut C, v: u8) {
    lda(cpu, cpu.a() ^ v);
}

#[inline]
pub(crate) fn bit<C: CpuRegs>(cpu: &mut C, v: u8) {
    set_flag(cpu, ZERO, (cpu.a() & v) == 0);
    set_flag(cpu, NEGATIVE, (v & 0x80) != 0);
    set_flag(cpu, OVERFLOW, (v & 0x40) != 0);
}

// ---------------------------------------------------------------------------
// Increment / Decrement (register)
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn inx<C: CpuRegs>(cpu: &mut C) {
    ldx(cpu, cpu.x().wrapping_add(1));
}

#[inline]
pub(crate) fn iny<C: CpuRegs>(cpu: &mut C) {
    ldy(cpu, cpu.y().wrapping_add(1));
}

#[inline]
pub(crate) fn dex<C: CpuRegs>(cpu: &mut C) {
    ldx(cpu, cpu.x().wrapping_sub(1));
}

#[inline]
pub(crate) fn dey<C: CpuRegs>(cpu: &mut C) {
    ldy(cpu, cpu.y().wrapping_sub(1));
}

// ---------------------------------------------------------------------------
// ADC / SBC
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn adc<C: CpuRegs>(cpu: &mut C, v: u8) {
    let a = cpu.a();
    let carry_in = get_flag(cpu, CARRY) as u16;
    let sum16 = a as u16 + v as u16 + carry_in;
    let result = sum16 as u8;

    set_flag(cpu, CARRY, sum16 > 0xFF);
    // Overflow: operands share a sign that the result does not.
    set_flag(cpu, OVERFLOW, ((!(a ^ v)) & (a ^ result) & 0x80) != 0);

    lda(cpu, result);
}

/// A - M - (1 - C), computed as A + !M + C.
#[inline]
pub(crate) fn sbc<C: CpuRegs>(cpu: &mut C, v: u8) {
    adc(cpu, v ^ 0xFF);
}

// ---------------------------------------------------------------------------
// Compare
// ---------------------------------------------------------------------------

/// Shared by CMP / CPX / CPY: flags of `reg - v`, registers untouched.
#[inline]
pub(crate) fn compare<C: CpuRegs>(cpu: &mut C, reg: u8, v: u8) {
    set_flag(cpu, CARRY, reg >= v);
    update_zn(cpu, reg.wrapping_sub(v));
}

// ---------------------------------------------------------------------------
// Read-Modify-Write
// ---------------------------------------------------------------------------

/// Read the operand, apply `transform`, write the result back and set N/Z.
/// Works for both the accumulator form and memory forms.
pub(crate) fn modify<C: CpuRegs, F>(cpu: &mut C, bus: &mut Bus, operand: Operand, transform: F)
where
    F: FnOnce(&mut C, u8) -> u8,
{
    let old = load(cpu, bus, operand);
    let new = transform(cpu, old);
    store(cpu, bus, operand, new);
    update_zn(cpu, new);
}

#[inline]
pub(crate) fn asl<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    set_flag(cpu, CARRY, (v & 0x80) != 0);
    v << 1
}

#[inline]
pub(crate) fn lsr<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    set_flag(cpu, CARRY, (v & 0x01) != 0);
    v >> 1
}

#[inline]
pub(crate) fn rol<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    let carry_in = get_flag(cpu, CARRY) as u8;
    set_flag(cpu, CARRY, (v & 0x80) != 0);
    (v << 1) | carry_in
}

#[inline]
pub(crate) fn ror<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    let carry_in = if get_flag(cpu, CARRY) { 0x80 } else { 0 };
    set_flag(cpu, CARRY, (v & 0x01) != 0);
    (v >> 1) | carry_in
}

// ---------------------------------------------------------------------------
// Branches
// ---------------------------------------------------------------------------

/// Apply a signed displacement to PC (already past the operand) when
/// `take` holds. No extra cycles are charged either way.
#[inline]
pub(crate) fn branch<C: CpuRegs>(cpu: &mut C, offset: i8, take: bool) {
    if take {
        cpu.set_pc(cpu.pc().wrapping_add_signed(offset as i16));
    }
}
