/*!
table.rs - Static 256-entry opcode table.

Design
------
- `OPCODES: [Instruction; 256]` is built at compile time by running the
  exhaustive `decode` match over every byte value.
- Each slot is either `Instruction::Op(Descriptor)` (operation, addressing
  mode, base cycle cost) or the explicit `Instruction::Illegal` marker.
  There is no "missing handler" state.
- The 151 documented opcodes are bound; a `const` assertion fails the
  build if that count drifts.
- Cycle costs are base costs only: no page-cross or branch-taken
  penalties are modelled.
*/

use std::fmt;

/// Documented 6502 mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
}

impl Operation {
    pub const COUNT: usize = 56;

    /// Upper-case assembler mnemonic.
    pub fn mnemonic(self) -> &'static str {
        use Operation::*;
        match self {
            Adc => "ADC",
            And => "AND",
            Asl => "ASL",
            Bcc => "BCC",
            Bcs => "BCS",
            Beq => "BEQ",
            Bit => "BIT",
            Bmi => "BMI",
            Bne => "BNE",
            Bpl => "BPL",
            Brk => "BRK",
            Bvc => "BVC",
            Bvs => "BVS",
            Clc => "CLC",
            Cld => "CLD",
            Cli => "CLI",
            Clv => "CLV",
            Cmp => "CMP",
            Cpx => "CPX",
            Cpy => "CPY",
            Dec => "DEC",
            Dex => "DEX",
            Dey => "DEY",
            Eor => "EOR",
            Inc => "INC",
            Inx => "INX",
            Iny => "INY",
            Jmp => "JMP",
            Jsr => "JSR",
            Lda => "LDA",
            Ldx => "LDX",
            Ldy => "LDY",
            Lsr => "LSR",
            Nop => "NOP",
            Ora => "ORA",
            Pha => "PHA",
            Php => "PHP",
            Pla => "PLA",
            Plp => "PLP",
            Rol => "ROL",
            Ror => "ROR",
            Rti => "RTI",
            Rts => "RTS",
            Sbc => "SBC",
            Sec => "SEC",
            Sed => "SED",
            Sei => "SEI",
            Sta => "STA",
            Stx => "STX",
            Sty => "STY",
            Tax => "TAX",
            Tay => "TAY",
            Tsx => "TSX",
            Txa => "TXA",
            Txs => "TXS",
            Tya => "TYA",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// The 13 addressing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    /// (zp,X)
    IndexedIndirect,
    /// (zp),Y
    IndirectIndexed,
    Relative,
}

impl Mode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_len(self) -> u16 {
        match self {
            Mode::Implied | Mode::Accumulator => 0,
            Mode::Absolute | Mode::AbsoluteX | Mode::AbsoluteY | Mode::Indirect => 2,
            _ => 1,
        }
    }
}

/// Operation, addressing mode and base cycle cost of one opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    pub operation: Operation,
    pub mode: Mode,
    pub cycles: u32,
}

impl Descriptor {
    /// Instruction length in bytes, opcode included.
    pub const fn len(&self) -> u16 {
        1 + self.mode.operand_len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Op(Descriptor),
    Illegal,
}

impl Instruction {
    pub const fn descriptor(self) -> Option<Descriptor> {
        match self {
            Instruction::Op(d) => Some(d),
            Instruction::Illegal => None,
        }
    }
}

/// Mnemonic, mode and length of an opcode, e.g. `LDA Immediate (2)`.
/// Undocumented opcodes render as `???`.
pub fn disassemble(opcode: u8) -> String {
    match lookup(opcode) {
        Instruction::Op(d) => format!("{} {:?} ({})", d.operation, d.mode, d.len()),
        Instruction::Illegal => "???".to_string(),
    }
}

/// Number of documented opcodes bound in `OPCODES`.
pub const DOCUMENTED_OPCODES: usize = 151;

const fn op(operation: Operation, mode: Mode, cycles: u32) -> Instruction {
    Instruction::Op(Descriptor {
        operation,
        mode,
        cycles,
    })
}

/// Decode one opcode byte.
pub const fn decode(opcode: u8) -> Instruction {
    use Mode::*;
    use Operation::*;
    match opcode {
        // ADC
        0x69 => op(Adc, Immediate, 2),
        0x65 => op(Adc, ZeroPage, 3),
        0x75 => op(Adc, ZeroPageX, 4),
        0x6D => op(Adc, Absolute, 4),
        0x7D => op(Adc, AbsoluteX, 4),
        0x79 => op(Adc, AbsoluteY, 4),
        0x61 => op(Adc, IndexedIndirect, 6),
        0x71 => op(Adc, IndirectIndexed, 5),
        // AND
        0x29 => op(And, Immediate, 2),
        0x25 => op(And, ZeroPage, 3),
        0x35 => op(And, ZeroPageX, 4),
        0x2D => op(And, Absolute, 4),
        0x3D => op(And, AbsoluteX, 4),
        0x39 => op(And, AbsoluteY, 4),
        0x21 => op(And, IndexedIndirect, 6),
        0x31 => op(And, IndirectIndexed, 5),
        // ASL
        0x0A => op(Asl, Accumulator, 2),
        0x06 => op(Asl, ZeroPage, 5),
        0x16 => op(Asl, ZeroPageX, 6),
        0x0E => op(Asl, Absolute, 6),
        0x1E => op(Asl, AbsoluteX, 7),
        // Branches
        0x10 => op(Bpl, Relative, 2),
        0x30 => op(Bmi, Relative, 2),
        0x50 => op(Bvc, Relative, 2),
        0x70 => op(Bvs, Relative, 2),
        0x90 => op(Bcc, Relative, 2),
        0xB0 => op(Bcs, Relative, 2),
        0xD0 => op(Bne, Relative, 2),
        0xF0 => op(Beq, Relative, 2),
        // BIT
        0x24 => op(Bit, ZeroPage, 3),
        0x2C => op(Bit, Absolute, 4),
        // BRK
        0x00 => op(Brk, Implied, 7),
        // Flag clears
        0x18 => op(Clc, Implied, 2),
        0xD8 => op(Cld, Implied, 2),
        0x58 => op(Cli, Implied, 2),
        0xB8 => op(Clv, Implied, 2),
        // CMP
        0xC9 => op(Cmp, Immediate, 2),
        0xC5 => op(Cmp, ZeroPage, 3),
        0xD5 => op(Cmp, ZeroPageX, 4),
        0xCD => op(Cmp, Absolute, 4),
        0xDD => op(Cmp, AbsoluteX, 4),
        0xD9 => op(Cmp, AbsoluteY, 4),
        0xC1 => op(Cmp, IndexedIndirect, 6),
        0xD1 => op(Cmp, IndirectIndexed, 5),
        // CPX / CPY
        0xE0 => op(Cpx, Immediate, 2),
        0xE4 => op(Cpx, ZeroPage, 3),
        0xEC => op(Cpx, Absolute, 4),
        0xC0 => op(Cpy, Immediate, 2),
        0xC4 => op(Cpy, ZeroPage, 3),
        0xCC => op(Cpy, Absolute, 4),
        // DEC
        0xC6 => op(Dec, ZeroPage, 5),
        0xD6 => op(Dec, ZeroPageX, 6),
        0xCE => op(Dec, Absolute, 6),
        0xDE => op(Dec, AbsoluteX, 7),
        0xCA => op(Dex, Implied, 2),
        0x88 => op(Dey, Implied, 2),
        // EOR
        0x49 => op(Eor, Immediate, 2),
        0x45 => op(Eor, ZeroPage, 3),
        0x55 => op(Eor, ZeroPageX, 4),
        0x4D => op(Eor, Absolute, 4),
        0x5D => op(Eor, AbsoluteX, 4),
        0x59 => op(Eor, AbsoluteY, 4),
        0x41 => op(Eor, IndexedIndirect, 6),
        0x51 => op(Eor, IndirectIndexed, 5),
        // INC
        0xE6 => op(Inc, ZeroPage, 5),
        0xF6 => op(Inc, ZeroPageX, 6),
        0xEE => op(Inc, Absolute, 6),
        0xFE => op(Inc, AbsoluteX, 7),
        0xE8 => op(Inx, Implied, 2),
        0xC8 => op(Iny, Implied, 2),
        // Jumps
        0x4C => op(Jmp, Absolute, 3),
        0x6C => op(Jmp, Indirect, 5),
        0x20 => op(Jsr, Absolute, 6),
        // LDA
        0xA9 => op(Lda, Immediate, 2),
        0xA5 => op(Lda, ZeroPage, 3),
        0xB5 => op(Lda, ZeroPageX, 4),
        0xAD => op(Lda, Absolute, 4),
        0xBD => op(Lda, AbsoluteX, 4),
        0xB9 => op(Lda, AbsoluteY, 4),
        0xA1 => op(Lda, IndexedIndirect, 6),
        0xB1 => op(Lda, IndirectIndexed, 5),
        // LDX
        0xA2 => op(Ldx, Immediate, 2),
        0xA6 => op(Ldx, ZeroPage, 3),
        0xB6 => op(Ldx, ZeroPageY, 4),
        0xAE => op(Ldx, Absolute, 4),
        0xBE => op(Ldx, AbsoluteY, 4),
        // LDY
        0xA0 => op(Ldy, Immediate, 2),
        0xA4 => op(Ldy, ZeroPage, 3),
        0xB4 => op(Ldy, ZeroPageX, 4),
        0xAC => op(Ldy, Absolute, 4),
        0xBC => op(Ldy, AbsoluteX, 4),
        // LSR
        0x4A => op(Lsr, Accumulator, 2),
        0x46 => op(Lsr, ZeroPage, 5),
        0x56 => op(Lsr, ZeroPageX, 6),
        0x4E => op(Lsr, Absolute, 6),
        0x5E => op(Lsr, AbsoluteX, 7),
        // NOP
        0xEA => op(Nop, Implied, 2),
        // ORA
        0x09 => op(Ora, Immediate, 2),
        0x05 => op(Ora, ZeroPage, 3),
        0x15 => op(Ora, ZeroPageX, 4),
        0x0D => op(Ora, Absolute, 4),
        0x1D => op(Ora, AbsoluteX, 4),
        0x19 => op(Ora, AbsoluteY, 4),
        0x01 => op(Ora, IndexedIndirect, 6),
        0x11 => op(Ora, IndirectIndexed, 5),
        // Stack
        0x48 => op(Pha, Implied, 3),
        0x08 => op(Php, Implied, 3),
        0x68 => op(Pla, Implied, 4),
        0x28 => op(Plp, Implied, 4),
        // ROL
        0x2A => op(Rol, Accumulator, 2),
        0x26 => op(Rol, ZeroPage, 5),
        0x36 => op(Rol, ZeroPageX, 6),
        0x2E => op(Rol, Absolute, 6),
        0x3E => op(Rol, AbsoluteX, 7),
        // ROR
        0x6A => op(Ror, Accumulator, 2),
        0x66 => op(Ror, ZeroPage, 5),
        0x76 => op(Ror, ZeroPageX, 6),
        0x6E => op(Ror, Absolute, 6),
        0x7E => op(Ror, AbsoluteX, 7),
        // Returns
        0x40 => op(Rti, Implied, 6),
        0x60 => op(Rts, Implied, 6),
        // SBC
        0xE9 => op(Sbc, Immediate, 2),
        0xE5 => op(Sbc, ZeroPage, 3),
        0xF5 => op(Sbc, ZeroPageX, 4),
        0xED => op(Sbc, Absolute, 4),
        0xFD => op(Sbc, AbsoluteX, 4),
        0xF9 => op(Sbc, AbsoluteY, 4),
        0xE1 => op(Sbc, IndexedIndirect, 6),
        0xF1 => op(Sbc, IndirectIndexed, 5),
        // Flag sets
        0x38 => op(Sec, Implied, 2),
        0xF8 => op(Sed, Implied, 2),
        0x78 => op(Sei, Implied, 2),
        // STA
        0x85 => op(Sta, ZeroPage, 3),
        0x95 => op(Sta, ZeroPageX, 4),
        0x8D => op(Sta, Absolute, 4),
        0x9D => op(Sta, AbsoluteX, 5),
        0x99 => op(Sta, AbsoluteY, 5),
        0x81 => op(Sta, IndexedIndirect, 6),
        0x91 => op(Sta, IndirectIndexed, 6),
        // STX / STY
        0x86 => op(Stx, ZeroPage, 3),
        0x96 => op(Stx, ZeroPageY, 4),
        0x8E => op(Stx, Absolute, 4),
        0x84 => op(Sty, ZeroPage, 3),
        0x94 => op(Sty, ZeroPageX, 4),
        0x8C => op(Sty, Absolute, 4),
        // Transfers
        0xAA => op(Tax, Implied, 2),
        0xA8 => op(Tay, Implied, 2),
        0xBA => op(Tsx, Implied, 2),
        0x8A => op(Txa, Implied, 2),
        0x9A => op(Txs, Implied, 2),
        0x98 => op(Tya, Implied, 2),
        _ => Instruction::Illegal,
    }
}

const fn build() -> [Instruction; 256] {
    let mut table = [Instruction::Illegal; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = decode(i as u8);
        i += 1;
    }
    table
}

const fn count_documented(table: &[Instruction; 256]) -> usize {
    let mut n = 0;
    let mut i = 0;
    while i < 256 {
        if matches!(table[i], Instruction::Op(_)) {
            n += 1;
        }
        i += 1;
    }
    n
}

pub static OPCODES: [Instruction; 256] = build();

const _: () = assert!(count_documented(&build()) == DOCUMENTED_OPCODES);

/// Table lookup for one opcode byte.
#[inline]
pub fn lookup(opcode: u8) -> Instruction {
    OPCODES[opcode as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_is_total_with_151_documented_opcodes() {
        assert_eq!(OPCODES.len(), 256);
        let documented = OPCODES
            .iter()
            .filter(|i| matches!(i, Instruction::Op(_)))
            .count();
        assert_eq!(documented, DOCUMENTED_OPCODES);
        let illegal = OPCODES
            .iter()
            .filter(|i| matches!(i, Instruction::Illegal))
            .count();
        assert_eq!(documented + illegal, 256);
    }

    #[test]
    fn every_operation_is_bound() {
        let ops: HashSet<Operation> = OPCODES
            .iter()
            .filter_map(|i| i.descriptor())
            .map(|d| d.operation)
            .collect();
        assert_eq!(ops.len(), Operation::COUNT);
    }

    #[test]
    fn every_mode_is_used() {
        let modes: HashSet<Mode> = OPCODES
            .iter()
            .filter_map(|i| i.descriptor())
            .map(|d| d.mode)
            .collect();
        assert_eq!(modes.len(), 13);
    }

    #[test]
    fn spot_check_descriptors() {
        let d = lookup(0xA9).descriptor().unwrap();
        assert_eq!(
            (d.operation, d.mode, d.cycles),
            (Operation::Lda, Mode::Immediate, 2)
        );
        let d = lookup(0x6C).descriptor().unwrap();
        assert_eq!(
            (d.operation, d.mode, d.cycles),
            (Operation::Jmp, Mode::Indirect, 5)
        );
        assert_eq!(d.len(), 3);
        let d = lookup(0x71).descriptor().unwrap();
        assert_eq!(
            (d.operation, d.mode, d.cycles),
            (Operation::Adc, Mode::IndirectIndexed, 5)
        );
        let d = lookup(0x00).descriptor().unwrap();
        assert_eq!((d.operation, d.cycles), (Operation::Brk, 7));
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn known_illegal_slots() {
        for opcode in [0x02u8, 0x03, 0x1A, 0x80, 0xFF, 0x9E] {
            assert_eq!(lookup(opcode), Instruction::Illegal, "opcode {opcode:02X}");
        }
    }

    #[test]
    fn cycle_costs_in_documented_range() {
        for d in OPCODES.iter().filter_map(|i| i.descriptor()) {
            assert!((2..=7).contains(&d.cycles), "{} {:?}", d.operation, d.mode);
        }
    }

    #[test]
    fn disassembly_reports_length() {
        assert_eq!(disassemble(0xA9), "LDA Immediate (2)");
        assert_eq!(disassemble(0x4C), "JMP Absolute (3)");
        assert_eq!(disassemble(0xEA), "NOP Implied (1)");
        assert_eq!(disassemble(0x02), "???");
    }

    #[test]
    fn instruction_lengths_match_operand_bytes() {
        for d in OPCODES.iter().filter_map(|i| i.descriptor()) {
            let expected = match d.mode {
                Mode::Implied | Mode::Accumulator => 1,
                Mode::Absolute | Mode::AbsoluteX | Mode::AbsoluteY | Mode::Indirect => 3,
                _ => 2,
            };
            assert_eq!(d.len(), expected, "{} {:?}", d.operation, d.mode);
        }
    }

    #[test]
    fn mnemonics_display() {
        assert_eq!(Operation::Sbc.to_string(), "SBC");
        assert_eq!(Operation::Txs.mnemonic(), "TXS");
    }
}
