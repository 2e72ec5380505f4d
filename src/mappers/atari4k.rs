/*
Atari 4K cartridge (standard 2600 board, no bank switching).

Characteristics:
- 4 KiB ROM selected by A12. The console only decodes 13 address lines, so
  every address with bit 12 set reads `rom[addr & 0x0FFF]`.
- Addresses with A12 clear are not decoded by the board: reads 0, writes
  ignored.
- 2 KiB images are mirrored into both halves of the window.
- No writable storage, so reset has nothing to clear.
*/

use log::trace;

use crate::error::CartridgeError;
use crate::mapper::{Mapper, MapperKind};

pub const ATARI_ROM_BASE: u16 = 0x1000;
pub const ATARI_BANK_SIZE: usize = 0x1000;

/// True when the console's chip select for the cartridge (A12) is high.
#[inline]
pub(crate) fn a12(addr: u16) -> bool {
    addr & ATARI_ROM_BASE != 0
}

#[derive(Debug, Clone)]
pub struct Atari4k {
    rom: Vec<u8>,
}

impl Default for Atari4k {
    fn default() -> Self {
        Self::new()
    }
}

impl Atari4k {
    pub fn new() -> Self {
        Self {
            rom: vec![0; ATARI_BANK_SIZE],
        }
    }
}

impl Mapper for Atari4k {
    fn kind(&self) -> MapperKind {
        MapperKind::Atari4k
    }

    fn read(&mut self, addr: u16) -> u8 {
        if a12(addr) {
            self.rom[(addr & 0x0FFF) as usize]
        } else {
            trace!("4K: unmapped read ${addr:04X}");
            0
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        if !a12(addr) {
            trace!("4K: unmapped write ${addr:04X} = ${value:02X}");
        }
    }

    fn load_rom(&mut self, image: &[u8]) -> Result<(), CartridgeError> {
        match image.len() {
            ATARI_BANK_SIZE => self.rom.copy_from_slice(image),
            0x0800 => {
                self.rom[..0x0800].copy_from_slice(image);
                self.rom[0x0800..].copy_from_slice(image);
            }
            len => {
                return Err(CartridgeError::RomSize {
                    len,
                    capacity: ATARI_BANK_SIZE,
                });
            }
        }
        Ok(())
    }

    fn rom_capacity(&self) -> usize {
        ATARI_BANK_SIZE
    }
}
