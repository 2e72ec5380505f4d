//! Shared test utilities for building raw ROM images and a ready-to-run
//! CPU + bus pair.
//!
//! Images are raw board images (no container header), as `Cartridge::load_rom`
//! expects them.
//!
//! Vectors:
//! - A 16 KiB NROM image is mirrored into $8000-$BFFF and $C000-$FFFF, so the
//!   vectors live at image offsets 0x3FFA..=0x3FFF.
//! - A 4 KiB Atari image answers at $F000-$FFFF, so the vectors live at
//!   offsets 0x0FFA..=0x0FFF.

use crate::bus::{Bus, Profile};
use crate::cartridge::Cartridge;
use crate::cpu::{Cpu, Interrupt};
use crate::mapper::MapperKind;

pub const NROM_128_SIZE: usize = 0x4000;
pub const ATARI_4K_SIZE: usize = 0x1000;

fn put_vectors(image: &mut [u8], nmi: u16, reset: u16, irq: u16) {
    let top = image.len() - 6;
    image[top..top + 2].copy_from_slice(&nmi.to_le_bytes());
    image[top + 2..top + 4].copy_from_slice(&reset.to_le_bytes());
    image[top + 4..].copy_from_slice(&irq.to_le_bytes());
}

/// 16 KiB NROM image with `prg` at $8000 and the given vectors.
pub fn nrom_image(prg: &[u8], nmi: u16, reset: u16, irq: u16) -> Vec<u8> {
    assert!(prg.len() <= NROM_128_SIZE - 6, "program overlaps vectors");
    let mut image = vec![0u8; NROM_128_SIZE];
    image[..prg.len()].copy_from_slice(prg);
    put_vectors(&mut image, nmi, reset, irq);
    image
}

/// 4 KiB Atari image with `prg` at $F000 and RESET pointing there.
pub fn atari_image(prg: &[u8]) -> Vec<u8> {
    assert!(prg.len() <= ATARI_4K_SIZE - 6, "program overlaps vectors");
    let mut image = vec![0u8; ATARI_4K_SIZE];
    image[..prg.len()].copy_from_slice(prg);
    put_vectors(&mut image, 0xF000, 0xF000, 0xF000);
    image
}

/// Profile B bus with an NROM cartridge holding `prg`, and a CPU that has
/// already taken RESET (PC = `reset`, SP = $FD, I set).
pub fn setup_with_vectors(prg: &[u8], nmi: u16, reset: u16, irq: u16) -> (Cpu, Bus) {
    let mut bus = Bus::new(Profile::Nes);
    let cart = Cartridge::with_rom(MapperKind::Nrom, &nrom_image(prg, nmi, reset, irq))
        .expect("NROM image");
    bus.attach_cartridge(cart);
    let mut cpu = Cpu::new();
    cpu.interrupt(&mut bus, Interrupt::Reset);
    (cpu, bus)
}

/// `setup_with_vectors` with every vector at $8000.
pub fn setup(prg: &[u8]) -> (Cpu, Bus) {
    setup_with_vectors(prg, 0x8000, 0x8000, 0x8000)
}

/// Profile A bus with an Atari 4K cartridge holding `prg` at $F000.
pub fn setup_vcs(prg: &[u8]) -> (Cpu, Bus) {
    let mut bus = Bus::new(Profile::Vcs);
    let cart = Cartridge::with_rom(MapperKind::Atari4k, &atari_image(prg)).expect("4K image");
    bus.attach_cartridge(cart);
    let mut cpu = Cpu::new();
    cpu.interrupt(&mut bus, Interrupt::Reset);
    (cpu, bus)
}
