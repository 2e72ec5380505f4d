/*!
regs.rs - `CpuRegs`, the register + flag interface instruction code is
written against.

The trait does not include bus access, stack or instruction fetch; those
take an explicit `&mut Bus` at the call site (see `addressing` and
`execute`). Static dispatch only: handlers are generic over
`C: CpuRegs`.
*/

use crate::cpu::state::{BREAK, CARRY, CpuState, NEGATIVE, OVERFLOW, UNUSED, ZERO};

/// Minimal 6502 register + flag API needed by instruction semantics.
pub trait CpuRegs {
    fn a(&self) -> u8;
    fn x(&self) -> u8;
    fn y(&self) -> u8;
    fn sp(&self) -> u8;
    fn pc(&self) -> u16;
    fn status(&self) -> u8;

    fn set_a(&mut self, v: u8);
    fn set_x(&mut self, v: u8);
    fn set_y(&mut self, v: u8);
    fn set_sp(&mut self, v: u8);
    fn set_pc(&mut self, v: u16);
    fn set_status(&mut self, v: u8);

    /// Advance PC by `delta` (wrapping at 16 bits).
    fn advance_pc(&mut self, delta: u16);

    #[inline]
    fn advance_pc_one(&mut self) {
        self.advance_pc(1);
    }

    /// Return true if mask bits are set.
    fn is_flag_set(&self, mask: u8) -> bool;

    /// Set or clear the bits in `mask`.
    fn assign_flag(&mut self, mask: u8, value: bool);

    /// ZERO and NEGATIVE from a result byte.
    #[inline]
    fn update_zn(&mut self, result: u8) {
        self.assign_flag(ZERO, result == 0);
        self.assign_flag(NEGATIVE, (result & 0x80) != 0);
    }

    #[inline]
    fn update_carry(&mut self, carry: bool) {
        self.assign_flag(CARRY, carry);
    }

    #[inline]
    fn update_overflow(&mut self, overflow: bool) {
        self.assign_flag(OVERFLOW, overflow);
    }

    /// Status byte for a stack push. UNUSED is forced; BREAK only when
    /// `set_break` (PHP / BRK), cleared for hardware interrupts.
    #[inline]
    fn compose_status_for_push(&self, set_break: bool) -> u8 {
        let v = self.status() | UNUSED;
        if set_break { v | BREAK } else { v & !BREAK }
    }
}

impl CpuRegs for CpuState {
    #[inline]
    fn a(&self) -> u8 {
        self.a
    }
    #[inline]
    fn x(&self) -> u8 {
        self.x
    }
    #[inline]
    fn y(&self) -> u8 {
        self.y
    }
    #[inline]
    fn sp(&self) -> u8 {
        self.sp
    }
    #[inline]
    fn pc(&self) -> u16 {
        self.pc
    }
    #[inline]
    fn status(&self) -> u8 {
        self.status
    }

    #[inline]
    fn set_a(&mut self, v: u8) {
        self.a = v;
    }
    #[inline]
    fn set_x(&mut self, v: u8) {
        self.x = v;
    }
    #[inline]
    fn set_y(&mut self, v: u8) {
        self.y = v;
    }
    #[inline]
    fn set_sp(&mut self, v: u8) {
        self.sp = v;
    }
    #[inline]
    fn set_pc(&mut self, v: u16) {
        self.pc = v;
    }
    #[inline]
    fn set_status(&mut self, v: u8) {
        self.status = v;
    }

    #[inline]
    fn advance_pc(&mut self, delta: u16) {
        CpuState::advance_pc(self, delta);
    }

    #[inline]
    fn is_flag_set(&self, mask: u8) -> bool {
        CpuState::is_flag_set(self, mask)
    }

    #[inline]
    fn assign_flag(&mut self, mask: u8, value: bool) {
        CpuState::assign_flag(self, mask, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_zn_behavior() {
        let mut s = CpuState::new();
        s.update_zn(0x00);
        assert!(s.is_flag_set(ZERO));
        assert!(!s.is_flag_set(NEGATIVE));
        s.update_zn(0x80);
        assert!(!s.is_flag_set(ZERO));
        assert!(s.is_flag_set(NEGATIVE));
        s.update_zn(0x7F);
        assert!(!s.is_flag_set(ZERO));
        assert!(!s.is_flag_set(NEGATIVE));
    }

    #[test]
    fn compose_status_break_flag_behavior() {
        let mut s = CpuState::new();
        s.assign_flag(BREAK, true);
        let with_break = s.compose_status_for_push(true);
        let without_break = s.compose_status_for_push(false);
        assert_ne!(with_break & BREAK, 0);
        assert_eq!(without_break & BREAK, 0);
        assert_ne!(with_break & UNUSED, 0);
        assert_ne!(without_break & UNUSED, 0);
    }
}
