/*!
control_flow.rs - Control-flow / system handler

Overview
========
  JMP abs        (0x4C)
  JMP (ind)      (0x6C)  (indirect page-wrap quirk resolved by `addressing`)
  JSR abs        (0x20)
  RTS            (0x60)
  RTI            (0x40)
  BRK            (0x00)

Behavior Details
================
- JSR pushes (PC - 1), high byte first, where PC is past the operand.
- RTS pulls the return address and resumes at address + 1.
- RTI pulls status (B cleared, U set) then PC, with no + 1.
- BRK skips its padding byte, pushes PC and status with B set, sets I
  and loads the vector at $FFFE/$FFFF. Execution continues at the
  handler; BRK does not stop the CPU.

Return Contract
===============
`handle` returns false for operations outside this family.
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{php, plp, pull_word, push_word, set_flag};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{IRQ_DISABLE, IRQ_VECTOR};
use crate::cpu::table::Operation;

#[inline]
fn op_jsr<C: CpuRegs>(cpu: &mut C, bus: &mut Bus, target: u16) {
    let ret = cpu.pc().wrapping_sub(1);
    push_word(cpu, bus, ret);
    cpu.set_pc(target);
}

#[inline]
fn op_rts<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) {
    let ret = pull_word(cpu, bus);
    cpu.set_pc(ret.wrapping_add(1));
}

#[inline]
fn op_brk<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) {
    cpu.advance_pc_one();
    let pc = cpu.pc();
    push_word(cpu, bus, pc);
    php(cpu, bus);
    set_flag(cpu, IRQ_DISABLE, true);
    let vector = bus.read_word(IRQ_VECTOR);
    cpu.set_pc(vector);
}

#[inline]
fn op_rti<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) {
    plp(cpu, bus);
    let return_pc = pull_word(cpu, bus);
    cpu.set_pc(return_pc);
}

pub(super) fn handle<C: CpuRegs>(
    op: Operation,
    operand: Operand,
    cpu: &mut C,
    bus: &mut Bus,
) -> bool {
    match (op, operand) {
        (Operation::Jmp, Operand::Address(target)) => cpu.set_pc(target),
        (Operation::Jsr, Operand::Address(target)) => op_jsr(cpu, bus, target),
        (Operation::Rts, _) => op_rts(cpu, bus),
        (Operation::Rti, _) => op_rti(cpu, bus),
        (Operation::Brk, _) => op_brk(cpu, bus),
        (Operation::Jmp | Operation::Jsr, _) => {
            debug_assert!(false, "{op} without an address operand");
        }
        _ => return false,
    }
    true
}
