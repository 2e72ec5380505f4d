/*!
misc.rs - Transfers, stack, flag and register inc/dec handler

Overview
========
Transfers:        TAX, TAY, TXA, TYA, TSX, TXS (TXS leaves flags alone)
Stack:            PHA, PHP, PLA, PLP
Flags:            CLC, SEC, CLI, SEI, CLD, SED, CLV
Register inc/dec: INX, INY, DEX, DEY
No-op:            NOP

Return Contract
===============
`handle` returns false for operations outside this family.
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{
    dex, dey, inx, iny, pha, php, pla, plp, set_flag, tax, tay, tsx, txa, txs, tya,
};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{CARRY, DECIMAL, IRQ_DISABLE, OVERFLOW};
use crate::cpu::table::Operation;

pub(super) fn handle<C: CpuRegs>(
    op: Operation,
    _operand: Operand,
    cpu: &mut C,
    bus: &mut Bus,
) -> bool {
    match op {
        Operation::Tax => tax(cpu),
        Operation::Tay => tay(cpu),
        Operation::Txa => txa(cpu),
        Operation::Tya => tya(cpu),
        Operation::Tsx => tsx(cpu),
        Operation::Txs => txs(cpu),

        Operation::Pha => pha(cpu, bus),
        Operation::Php => php(cpu, bus),
        Operation::Pla => pla(cpu, bus),
        Operation::Plp => plp(cpu, bus),

        Operation::Clc => set_flag(cpu, CARRY, false),
        Operation::Sec => set_flag(cpu, CARRY, true),
        Operation::Cli => set_flag(cpu, IRQ_DISABLE, false),
        Operation::Sei => set_flag(cpu, IRQ_DISABLE, true),
        Operation::Cld => set_flag(cpu, DECIMAL, false),
        Operation::Sed => set_flag(cpu, DECIMAL, true),
        Operation::Clv => set_flag(cpu, OVERFLOW, false),

        Operation::Inx => inx(cpu),
        Operation::Iny => iny(cpu),
        Operation::Dex => dex(cpu),
        Operation::Dey => dey(cpu),

        Operation::Nop => {}
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::cpu::state::{BREAK, CARRY, NEGATIVE, OVERFLOW, UNUSED, ZERO};
    use crate::test_utils::setup;

    #[test]
    fn pha_pla_restores_a_and_sp() {
        // LDA #$42; PHA; LDA #$00; PLA
        let (mut cpu, mut bus) = setup(&[0xA9, 0x42, 0x48, 0xA9, 0x00, 0x68]);
        let sp = cpu.sp();
        cpu.step(&mut bus);
        assert_eq!(cpu.step(&mut bus).cycles(), 3);
        assert_eq!(cpu.sp(), sp.wrapping_sub(1));
        cpu.step(&mut bus);
        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.step(&mut bus).cycles(), 4);
        assert_eq!(cpu.a(), 0x42, "PLA should restore A");
        assert_eq!(cpu.sp(), sp);
    }

    #[test]
    fn php_sets_break_and_unused_in_pushed_copy() {
        let (mut cpu, mut bus) = setup(&[0x08]);
        let sp = cpu.sp();
        cpu.step(&mut bus);
        let pushed = bus.read(0x0100 | sp as u16);
        assert_ne!(pushed & BREAK, 0);
        assert_ne!(pushed & UNUSED, 0);
        assert!(!cpu.get_flag(BREAK));
    }

    #[test]
    fn plp_restores_flags() {
        // LDA #$C3; PHA; PLP
        let (mut cpu, mut bus) = setup(&[0xA9, 0xC3, 0x48, 0x28]);
        for _ in 0..3 {
            cpu.step(&mut bus);
        }
        assert!(cpu.get_flag(NEGATIVE));
        assert!(cpu.get_flag(OVERFLOW));
        assert!(cpu.get_flag(CARRY));
        assert!(cpu.get_flag(ZERO));
        assert!(cpu.get_flag(UNUSED));
    }

    #[test]
    fn flag_instructions() {
        // SEC; SED; SEI; CLC; CLD; CLI; CLV
        let (mut cpu, mut bus) = setup(&[0x38, 0xF8, 0x78, 0x18, 0xD8, 0x58, 0xB8]);
        cpu.set_flag(OVERFLOW, true);
        for _ in 0..3 {
            cpu.step(&mut bus);
        }
        assert_eq!(cpu.status() & 0x0D, 0x0D);
        for _ in 0..4 {
            cpu.step(&mut bus);
        }
        assert_eq!(cpu.status() & 0x4D, 0x00);
    }

    #[test]
    fn transfers_and_tsx_txs() {
        // LDX #$80; TXS; TSX; TXA; TAY; DEY; INX
        let (mut cpu, mut bus) = setup(&[0xA2, 0x80, 0x9A, 0xBA, 0x8A, 0xA8, 0x88, 0xE8]);
        for _ in 0..7 {
            cpu.step(&mut bus);
        }
        assert_eq!(cpu.sp(), 0x80);
        assert_eq!(cpu.a(), 0x80);
        assert_eq!(cpu.y(), 0x7F);
        assert_eq!(cpu.x(), 0x81);
        assert!(cpu.get_flag(NEGATIVE));
    }

    #[test]
    fn nop_changes_nothing_but_pc() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        let before = *cpu.state();
        cpu.step(&mut bus);
        let after = *cpu.state();
        assert_eq!(after.pc, before.pc + 1);
        assert_eq!(
            (after.a, after.x, after.y, after.sp, after.status),
            (before.a, before.x, before.y, before.sp, before.status)
        );
    }
}
