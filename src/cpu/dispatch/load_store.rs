/*!
load_store.rs - Load / Store family handler

Overview
========
Loads (set Z/N flags):
    LDA: A9, A5, B5, AD, BD, B9, A1, B1
    LDX: A2, A6, B6, AE, BE
    LDY: A0, A4, B4, AC, BC

Stores (no flags changed):
    STA: 85, 95, 8D, 9D, 99, 81, 91
    STX: 86, 96, 8E
    STY: 84, 94, 8C

Return Contract
===============
`handle` returns false for operations outside this family.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{Operand, load, store};
use crate::cpu::execute::{lda, ldx, ldy};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Operation;

pub(super) fn handle<C: CpuRegs>(
    op: Operation,
    operand: Operand,
    cpu: &mut C,
    bus: &mut Bus,
) -> bool {
    match op {
        Operation::Lda => {
            let v = load(cpu, bus, operand);
            lda(cpu, v);
        }
        Operation::Ldx => {
            let v = load(cpu, bus, operand);
            ldx(cpu, v);
        }
        Operation::Ldy => {
            let v = load(cpu, bus, operand);
            ldy(cpu, v);
        }
        Operation::Sta => {
            let a = cpu.a();
            store(cpu, bus, operand, a);
        }
        Operation::Stx => {
            let x = cpu.x();
            store(cpu, bus, operand, x);
        }
        Operation::Sty => {
            let y = cpu.y();
            store(cpu, bus, operand, y);
        }
        _ => return false,
    }
    true
}
