/*!
rmw.rs - Read-Modify-Write family handler (ASL/LSR/ROL/ROR/INC/DEC)

Overview
========
Shifts and rotates act on the accumulator (`Operand::Accumulator`) or on
memory; INC/DEC act on memory only. Every form writes the result back and
updates N/Z; shifts and rotates also set C from the bit shifted out.

```text
    ASL: 0A, 06, 16, 0E, 1E
    LSR: 4A, 46, 56, 4E, 5E
    ROL: 2A, 26, 36, 2E, 3E
    ROR: 6A, 66, 76, 6E, 7E
    INC: E6, F6, EE, FE
    DEC: C6, D6, CE, DE
```

The dummy write of the original value that real hardware performs is not
reproduced; only the final value reaches the bus.
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{asl, lsr, modify, rol, ror};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Operation;

pub(super) fn handle<C: CpuRegs>(
    op: Operation,
    operand: Operand,
    cpu: &mut C,
    bus: &mut Bus,
) -> bool {
    match op {
        Operation::Asl => modify(cpu, bus, operand, asl),
        Operation::Lsr => modify(cpu, bus, operand, lsr),
        Operation::Rol => modify(cpu, bus, operand, rol),
        Operation::Ror => modify(cpu, bus, operand, ror),
        Operation::Inc => modify(cpu, bus, operand, |_, v| v.wrapping_add(1)),
        Operation::Dec => modify(cpu, bus, operand, |_, v| v.wrapping_sub(1)),
        _ => return false,
    }
    true
}
