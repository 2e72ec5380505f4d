use std::cell::Cell;
use std::rc::Rc;

use crate::bus::{
    Bus, LatchedRegisters, MemoryMap, OPEN_BUS, Profile, RegisterWindow, STUB_READ, Target,
    WindowId,
};
use crate::cartridge::Cartridge;
use crate::error::BusError;
use crate::mapper::MapperKind;
use crate::test_utils::{atari_image, nrom_image};

/// Hook that records the last access and can hold IRQ asserted.
struct Probe {
    last_write: Rc<Cell<Option<(u16, u8)>>>,
    irq: Rc<Cell<bool>>,
    resets: Rc<Cell<u32>>,
}

impl RegisterWindow for Probe {
    fn read(&mut self, offset: u16) -> u8 {
        0x40 | offset as u8
    }

    fn write(&mut self, offset: u16, value: u8) {
        self.last_write.set(Some((offset, value)));
    }

    fn reset(&mut self) {
        self.resets.set(self.resets.get() + 1);
    }

    fn irq_asserted(&self) -> bool {
        self.irq.get()
    }
}

fn probe() -> (Probe, Rc<Cell<Option<(u16, u8)>>>, Rc<Cell<bool>>, Rc<Cell<u32>>) {
    let last_write = Rc::new(Cell::new(None));
    let irq = Rc::new(Cell::new(false));
    let resets = Rc::new(Cell::new(0));
    (
        Probe {
            last_write: last_write.clone(),
            irq: irq.clone(),
            resets: resets.clone(),
        },
        last_write,
        irq,
        resets,
    )
}

fn nes_bus_with_cart() -> Bus {
    let mut bus = Bus::new(Profile::Nes);
    let cart = Cartridge::with_rom(
        MapperKind::Nrom,
        &nrom_image(&[0xEA, 0xEA], 0x8000, 0x8000, 0x8000),
    )
    .unwrap();
    bus.attach_cartridge(cart);
    bus
}

#[test]
fn ram_mirroring() {
    let mut bus = Bus::new(Profile::Nes);

    // Write to $0001
    bus.write(0x0001, 0x42);
    // Mirrors every 2KB up to $1FFF
    assert_eq!(bus.read(0x0801), 0x42);
    assert_eq!(bus.read(0x1001), 0x42);
    assert_eq!(bus.read(0x1801), 0x42);

    // Writing through a mirror lands in the same cell
    bus.write(0x0800, 0xAB);
    assert_eq!(bus.read(0x0000), 0xAB);
    assert_eq!(bus.ram().as_slice()[0], 0xAB);
}

#[test]
fn vcs_stack_page_aliases_ram() {
    let mut bus = Bus::new(Profile::Vcs);
    bus.write(0x0080, 0x11);
    bus.write(0x01FF, 0x22);
    assert_eq!(bus.read(0x0180), 0x11);
    assert_eq!(bus.read(0x00FF), 0x22);
    assert_eq!(bus.ram().len(), 0x80);
    assert_eq!(bus.ram().as_slice()[0x7F], 0x22);
    // $0000 is TIA, not RAM
    assert_eq!(bus.read(0x0000), STUB_READ);
}

#[test]
fn unbound_windows_are_stubs() {
    let mut bus = nes_bus_with_cart();
    for addr in [0x2000, 0x2007, 0x3FFF, 0x4000, 0x401F] {
        bus.write(addr, 0x99);
        assert_eq!(bus.read(addr), STUB_READ, "addr ${addr:04X}");
    }
}

#[test]
fn cartridge_space_without_cartridge_is_open_bus() {
    let mut bus = Bus::new(Profile::Nes);
    assert_eq!(bus.read(0x4020), OPEN_BUS);
    assert_eq!(bus.read(0x8000), OPEN_BUS);
    assert_eq!(bus.read(0xFFFF), OPEN_BUS);
    bus.write(0x8000, 0x00);
    assert_eq!(bus.read(0x8000), OPEN_BUS);
}

#[test]
fn cartridge_sees_verbatim_address() {
    let mut bus = nes_bus_with_cart();
    // NROM battery RAM at $6000
    bus.write(0x6000, 0x5A);
    assert_eq!(bus.read(0x6000), 0x5A);
    // 16K image mirrors into $C000
    assert_eq!(bus.read(0x8000), 0xEA);
    assert_eq!(bus.read(0xC000), 0xEA);
    // Expansion area is outside both NROM windows
    assert_eq!(bus.read(0x5000), 0x00);
}

#[test]
fn hook_receives_folded_offsets() {
    let mut bus = Bus::new(Profile::Nes);
    let (hook, last_write, _, _) = probe();
    bus.attach_window(WindowId::Ppu, Box::new(hook)).unwrap();

    // $3456 mirrors PPU register 6
    bus.write(0x3456, 0x77);
    assert_eq!(last_write.get(), Some((6, 0x77)));
    assert_eq!(bus.read(0x2002), 0x42);
    assert_eq!(bus.read(0x3FFA), 0x42);
}

#[test]
fn attach_to_absent_window_fails() {
    let mut bus = Bus::new(Profile::Nes);
    let err = bus
        .attach_window(WindowId::Tia, Box::new(LatchedRegisters::new(0x80)))
        .unwrap_err();
    assert_eq!(err, BusError::WindowNotMapped(WindowId::Tia));

    let mut vcs = Bus::new(Profile::Vcs);
    assert!(vcs
        .attach_window(WindowId::Ppu, Box::new(LatchedRegisters::new(8)))
        .is_err());
    assert!(vcs
        .attach_window(WindowId::Riot, Box::new(LatchedRegisters::new(0x100)))
        .is_ok());
}

#[test]
fn detach_window_restores_stub() {
    let mut bus = Bus::new(Profile::Vcs);
    bus.attach_window(WindowId::Tia, Box::new(LatchedRegisters::new(0x80)))
        .unwrap();
    bus.write(0x0010, 0x33);
    assert_eq!(bus.read(0x0010), 0x33);
    assert!(bus.detach_window(WindowId::Tia).is_some());
    assert_eq!(bus.read(0x0010), STUB_READ);
}

#[test]
fn hook_drives_irq_line() {
    let mut bus = Bus::new(Profile::Nes);
    let (hook, _, irq, _) = probe();
    bus.attach_window(WindowId::ApuIo, Box::new(hook)).unwrap();
    assert!(!bus.irq_asserted());
    irq.set(true);
    assert!(bus.irq_asserted());
    irq.set(false);
    bus.set_irq(true);
    assert!(bus.irq_asserted());
}

#[test]
fn reset_clears_ram_lines_and_hooks() {
    let mut bus = nes_bus_with_cart();
    let (hook, _, _, resets) = probe();
    bus.attach_window(WindowId::Ppu, Box::new(hook)).unwrap();
    bus.write(0x0123, 0x01);
    bus.write(0x6000, 0x02);
    bus.request_nmi();
    bus.set_irq(true);

    bus.reset();

    assert_eq!(bus.read(0x0123), 0x00);
    assert_eq!(bus.read(0x6000), 0x00);
    assert_eq!(bus.read(0x8000), 0xEA);
    assert!(!bus.interrupts.nmi);
    assert!(!bus.irq_asserted());
    assert_eq!(resets.get(), 1);
    assert!(bus.cartridge().is_some());
}

#[test]
fn decode_is_total_for_both_profiles() {
    for profile in [Profile::Vcs, Profile::Nes] {
        let bus = Bus::new(profile);
        let mut ram = 0u32;
        for addr in 0..=u16::MAX {
            if let Target::Ram(_) = bus.decode(addr) {
                ram += 1;
            }
        }
        let expected = match profile {
            Profile::Vcs => 0x100,
            Profile::Nes => 0x2000,
        };
        assert_eq!(ram, expected, "{profile:?}");
    }
}

#[test]
fn vcs_cartridge_on_a12() {
    let mut bus = Bus::new(Profile::Vcs);
    let mut prg = vec![0u8; 0x10];
    prg[0] = 0xA9;
    prg[1] = 0x42;
    let cart = Cartridge::with_rom(MapperKind::Atari4k, &atari_image(&prg)).unwrap();
    bus.attach_cartridge(cart);
    assert_eq!(bus.read(0xF000), 0xA9);
    assert_eq!(bus.read(0x1001), 0x42);
    assert_eq!(bus.read_word(0xFFFC), 0xF000);
    // $0100-$017F falls through to the cartridge with A12 clear
    assert_eq!(bus.read(0x0150), 0x00);
}

#[test]
fn read_word_wraps_at_top() {
    let mut bus = nes_bus_with_cart();
    bus.write(0x0000, 0x12);
    // Low byte from $FFFF (image offset 0x3FFF), high byte from $0000
    let lo = bus.read(0xFFFF) as u16;
    assert_eq!(bus.read_word(0xFFFF), 0x1200 | lo);
}

#[test]
fn custom_map_with_windows() {
    use crate::bus::{Region, RegionKind};

    let map = MemoryMap::new(vec![
        Region::mirrored(RegionKind::Ram, 0x0000, 0x0100, 0x0400),
        Region::new(RegionKind::Window(WindowId::Riot), 0x0400, 0x0010),
    ])
    .unwrap();
    let mut bus = Bus::with_map(map);
    bus.write(0x0305, 0xCD);
    assert_eq!(bus.read(0x0005), 0xCD);
    assert_eq!(bus.ram().len(), 0x100);
    assert_eq!(bus.decode(0x0410), Target::Cartridge);
    assert!(bus
        .attach_window(WindowId::Riot, Box::new(LatchedRegisters::new(0x10)))
        .is_ok());
}
