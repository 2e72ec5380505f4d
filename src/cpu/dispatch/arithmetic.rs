/*!
arithmetic.rs - ADC / SBC handler

Binary arithmetic only. The decimal flag is carried in the status byte
but never changes the result.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{Operand, load};
use crate::cpu::execute::{adc, sbc};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Operation;

pub(super) fn handle<C: CpuRegs>(
    op: Operation,
    operand: Operand,
    cpu: &mut C,
    bus: &mut Bus,
) -> bool {
    match op {
        Operation::Adc => {
            let v = load(cpu, bus, operand);
            adc(cpu, v);
        }
        Operation::Sbc => {
            let v = load(cpu, bus, operand);
            sbc(cpu, v);
        }
        _ => return false,
    }
    true
}
