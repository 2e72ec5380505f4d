//! Property tests over decode, mirroring, flags, the stack and the ALU.

use proptest::prelude::*;
use proptest::sample::select;

use mos_console::bus::{LatchedRegisters, RegionKind, Target};
use mos_console::cpu::state::ALL_FLAGS;
use mos_console::cpu::{CARRY, Instruction, NEGATIVE, OPCODES, OVERFLOW, ZERO};
use mos_console::{Bus, Cartridge, Cpu, Interrupt, MapperKind, Profile, WindowId};

fn boot(prg: &[u8]) -> (Cpu, Bus) {
    let mut image = vec![0u8; 0x4000];
    image[..prg.len()].copy_from_slice(prg);
    image[0x3FFC..0x3FFE].copy_from_slice(&0x8000u16.to_le_bytes());
    let mut bus = Bus::new(Profile::Nes);
    bus.attach_cartridge(Cartridge::with_rom(MapperKind::Nrom, &image).unwrap());
    let mut cpu = Cpu::new();
    cpu.interrupt(&mut bus, Interrupt::Reset);
    (cpu, bus)
}

fn illegal_opcodes() -> Vec<u8> {
    (0..=u8::MAX)
        .filter(|&op| matches!(OPCODES[op as usize], Instruction::Illegal))
        .collect()
}

fn profiles() -> impl Strategy<Value = Profile> {
    prop_oneof![Just(Profile::Vcs), Just(Profile::Nes)]
}

proptest! {
    #[test]
    fn decode_is_total_and_consistent(profile in profiles(), addr in any::<u16>()) {
        let map = profile.memory_map();
        let containing: Vec<_> = map.regions().iter().filter(|r| r.contains(addr)).collect();
        prop_assert!(containing.len() <= 1);
        match (map.decode(addr), containing.first()) {
            (Target::Cartridge, None) => {}
            (Target::Ram(offset), Some(r)) => {
                prop_assert_eq!(r.kind, RegionKind::Ram);
                prop_assert!((offset as u32) < r.size);
            }
            (Target::Window(id, offset), Some(r)) => {
                prop_assert_eq!(r.kind, RegionKind::Window(id));
                prop_assert!((offset as u32) < r.size);
            }
            (target, region) => prop_assert!(false, "{:?} vs {:?}", target, region),
        }
    }

    #[test]
    fn nes_ram_mirrors(addr in 0u16..0x2000, value in any::<u8>()) {
        let mut bus = Bus::new(Profile::Nes);
        bus.write(addr, value);
        prop_assert_eq!(bus.read(addr % 0x0800), value);
        prop_assert_eq!(bus.read(addr % 0x0800 + 0x1800), value);
    }

    #[test]
    fn nes_ppu_window_mirrors(k in 0u16..0x2000, value in any::<u8>()) {
        let mut bus = Bus::new(Profile::Nes);
        bus.attach_window(WindowId::Ppu, Box::new(LatchedRegisters::new(8))).unwrap();
        bus.write(0x2000 + k, value);
        prop_assert_eq!(bus.read(0x2000 + k % 8), value);
    }

    #[test]
    fn flag_round_trip(
        mask in select(ALL_FLAGS.to_vec()),
        on in any::<bool>(),
        seed in any::<u8>(),
    ) {
        let mut cpu = Cpu::new();
        cpu.set_status(seed);
        cpu.set_flag(mask, on);
        prop_assert_eq!(cpu.get_flag(mask), on);
        // Other bits untouched
        prop_assert_eq!(cpu.state().status() & !mask, seed & !mask);
    }

    #[test]
    fn stack_identity(sp in any::<u8>(), byte in any::<u8>(), word in any::<u16>()) {
        let mut bus = Bus::new(Profile::Nes);
        let mut cpu = Cpu::new();
        cpu.set_sp(sp);

        cpu.push(&mut bus, byte);
        prop_assert_eq!(cpu.sp(), sp.wrapping_sub(1));
        prop_assert_eq!(cpu.pull(&mut bus), byte);
        prop_assert_eq!(cpu.sp(), sp);

        cpu.push_word(&mut bus, word);
        prop_assert_eq!(cpu.sp(), sp.wrapping_sub(2));
        prop_assert_eq!(cpu.pull_word(&mut bus), word);
        prop_assert_eq!(cpu.sp(), sp);
    }

    #[test]
    fn vcs_stack_identity(sp in 0x82u8..=0xFF, byte in any::<u8>(), word in any::<u16>()) {
        // $0180-$01FF is the RAM alias; stay inside it.
        let mut bus = Bus::new(Profile::Vcs);
        let mut cpu = Cpu::new();
        cpu.set_sp(sp);

        cpu.push(&mut bus, byte);
        prop_assert_eq!(bus.read(0x0100 | sp as u16), byte);
        prop_assert_eq!(cpu.pull(&mut bus), byte);
        cpu.push_word(&mut bus, word);
        prop_assert_eq!(cpu.pull_word(&mut bus), word);
        prop_assert_eq!(cpu.sp(), sp);
    }

    #[test]
    fn illegal_opcode_changes_only_pc(
        opcode in select(illegal_opcodes()),
        a in any::<u8>(),
        x in any::<u8>(),
        y in any::<u8>(),
        status in any::<u8>(),
    ) {
        let (mut cpu, mut bus) = boot(&[opcode]);
        cpu.set_a(a);
        cpu.set_x(x);
        cpu.set_y(y);
        cpu.set_status(status);
        let mut expected = *cpu.state();
        expected.set_pc(0x8001);

        let outcome = cpu.step(&mut bus);
        prop_assert!(outcome.is_illegal());
        prop_assert_eq!(outcome.cycles(), 0);
        prop_assert_eq!(*cpu.state(), expected);
    }

    #[test]
    fn beq_branches_on_zero(offset in any::<i8>(), zero in any::<bool>()) {
        let (mut cpu, mut bus) = boot(&[0xF0, offset as u8]);
        cpu.set_flag(ZERO, zero);
        prop_assert_eq!(cpu.step(&mut bus).cycles(), 2);
        let after = 0x8002u16;
        let expected = if zero { after.wrapping_add(offset as i16 as u16) } else { after };
        prop_assert_eq!(cpu.pc(), expected);
    }

    #[test]
    fn adc_matches_binary_reference(a in any::<u8>(), m in any::<u8>(), carry in any::<bool>()) {
        let (mut cpu, mut bus) = boot(&[0x69, m]);
        cpu.set_a(a);
        cpu.set_flag(CARRY, carry);
        cpu.step(&mut bus);

        let sum = a as u16 + m as u16 + carry as u16;
        let result = sum as u8;
        prop_assert_eq!(cpu.a(), result);
        prop_assert_eq!(cpu.get_flag(CARRY), sum > 0xFF);
        prop_assert_eq!(cpu.get_flag(OVERFLOW), (!(a ^ m) & (a ^ result) & 0x80) != 0);
        prop_assert_eq!(cpu.get_flag(ZERO), result == 0);
        prop_assert_eq!(cpu.get_flag(NEGATIVE), result & 0x80 != 0);
    }

    #[test]
    fn sbc_is_no_borrow_subtraction(a in any::<u8>(), m in any::<u8>()) {
        let (mut cpu, mut bus) = boot(&[0xE9, m]);
        cpu.set_a(a);
        cpu.set_flag(CARRY, true);
        cpu.step(&mut bus);
        prop_assert_eq!(cpu.a(), a.wrapping_sub(m));
        prop_assert_eq!(cpu.get_flag(CARRY), a >= m);
    }
}

#[test]
fn table_is_total() {
    let documented = OPCODES
        .iter()
        .filter(|i| matches!(i, Instruction::Op(_)))
        .count();
    assert_eq!(documented, 151);
    assert_eq!(illegal_opcodes().len(), 256 - 151);
}
