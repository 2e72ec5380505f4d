/*!
branches.rs - Relative branch handler (BPL/BMI/BVC/BVS/BCC/BCS/BNE/BEQ)

Overview
========
The displacement has already been fetched by operand resolution, so PC
points at the next instruction. When the condition holds, the signed
offset is added to that PC.

Cycle Rules
===========
Base cost 2 cycles whether or not the branch is taken. Taken and
page-crossing penalties are not modelled.
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{branch, get_flag};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{CARRY, NEGATIVE, OVERFLOW, ZERO};
use crate::cpu::table::Operation;

pub(super) fn handle<C: CpuRegs>(
    op: Operation,
    operand: Operand,
    cpu: &mut C,
    _bus: &mut Bus,
) -> bool {
    let take = match op {
        Operation::Bpl => !get_flag(cpu, NEGATIVE),
        Operation::Bmi => get_flag(cpu, NEGATIVE),
        Operation::Bvc => !get_flag(cpu, OVERFLOW),
        Operation::Bvs => get_flag(cpu, OVERFLOW),
        Operation::Bcc => !get_flag(cpu, CARRY),
        Operation::Bcs => get_flag(cpu, CARRY),
        Operation::Bne => !get_flag(cpu, ZERO),
        Operation::Beq => get_flag(cpu, ZERO),
        _ => return false,
    };
    if let Operand::Relative(offset) = operand {
        branch(cpu, offset, take);
    }
    true
}
