/*!
logical.rs - AND / ORA / EOR / BIT handler

AND, ORA and EOR combine the operand into A and update only N/Z.
BIT leaves A alone: Z from `A & M`, N and V copied from bits 7 and 6 of M.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{Operand, load};
use crate::cpu::execute::{and, bit, eor, ora};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Operation;

pub(super) fn handle<C: CpuRegs>(
    op: Operation,
    operand: Operand,
    cpu: &mut C,
    bus: &mut Bus,
) -> bool {
    let f: fn(&mut C, u8) = match op {
        Operation::And => and,
        Operation::Ora => ora,
        Operation::Eor => eor,
        Operation::Bit => bit,
        _ => return false,
    };
    let v = load(cpu, bus, operand);
    f(cpu, v);
    true
}
