/*!
compare.rs - CMP / CPX / CPY handler

Overview
========
Compares a register with the operand without storing the difference:
- C = register >= operand (no borrow)
- Z = register == operand
- N = bit 7 of `register - operand`

    CMP: C9, C5, D5, CD, DD, D9, C1, D1
    CPX: E0, E4, EC
    CPY: C0, C4, CC

Return Contract
===============
`handle` returns false for operations outside this family.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{Operand, load};
use crate::cpu::execute::compare;
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Operation;

pub(super) fn handle<C: CpuRegs>(
    op: Operation,
    operand: Operand,
    cpu: &mut C,
    bus: &mut Bus,
) -> bool {
    let reg = match op {
        Operation::Cmp => cpu.a(),
        Operation::Cpx => cpu.x(),
        Operation::Cpy => cpu.y(),
        _ => return false,
    };
    let v = load(cpu, bus, operand);
    compare(cpu, reg, v);
    true
}
