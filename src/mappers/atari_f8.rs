/*
Atari F8 cartridge (8 KiB, two 4 KiB banks).

Bank Select:
- Touching $1FF8 selects bank 0, touching $1FF9 selects bank 1. Reads and
  writes both count, and the hotspots are decoded through A12 like the rest
  of the window, so $FFF8/$FFF9 work too.
- A hotspot read returns the byte from the newly selected bank.

Reset Behavior:
- Bank 1 is selected (the bank that holds the reset vector on real carts).
*/

use log::trace;

use crate::error::CartridgeError;
use crate::mapper::{Mapper, MapperKind};
use crate::mappers::atari4k::{ATARI_BANK_SIZE, a12};

pub const F8_ROM_SIZE: usize = 2 * ATARI_BANK_SIZE;
const HOTSPOT_BANK0: u16 = 0x0FF8;
const HOTSPOT_BANK1: u16 = 0x0FF9;
const RESET_BANK: usize = 1;

#[derive(Debug, Clone)]
pub struct AtariF8 {
    rom: Vec<u8>,
    bank: usize,
}

impl Default for AtariF8 {
    fn default() -> Self {
        Self::new()
    }
}

impl AtariF8 {
    pub fn new() -> Self {
        Self {
            rom: vec![0; F8_ROM_SIZE],
            bank: RESET_BANK,
        }
    }

    pub fn current_bank(&self) -> usize {
        self.bank
    }

    #[inline]
    fn switch_on_hotspot(&mut self, offset: u16) {
        match offset {
            HOTSPOT_BANK0 => self.bank = 0,
            HOTSPOT_BANK1 => self.bank = 1,
            _ => {}
        }
    }
}

impl Mapper for AtariF8 {
    fn kind(&self) -> MapperKind {
        MapperKind::AtariF8
    }

    fn read(&mut self, addr: u16) -> u8 {
        if !a12(addr) {
            trace!("F8: unmapped read ${addr:04X}");
            return 0;
        }
        let offset = addr & 0x0FFF;
        self.switch_on_hotspot(offset);
        self.rom[self.bank * ATARI_BANK_SIZE + offset as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        if a12(addr) {
            self.switch_on_hotspot(addr & 0x0FFF);
        } else {
            trace!("F8: unmapped write ${addr:04X} = ${value:02X}");
        }
    }

    fn reset(&mut self) {
        self.bank = RESET_BANK;
    }

    fn load_rom(&mut self, image: &[u8]) -> Result<(), CartridgeError> {
        if image.len() != F8_ROM_SIZE {
            return Err(CartridgeError::RomSize {
                len: image.len(),
                capacity: F8_ROM_SIZE,
            });
        }
        self.rom.copy_from_slice(image);
        Ok(())
    }

    fn rom_capacity(&self) -> usize {
        F8_ROM_SIZE
    }
}
