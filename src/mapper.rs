/*!
Mapper subsystem: the `Mapper` trait, the `MapperKind` tag and the NROM
implementation.

Purpose:
- Decouple cartridge address mapping from the bus so each board variant
  owns its storage and decides how cartridge-space addresses land in it.
- The bus forwards every cartridge-space access with the full CPU address.

Variants (see `mappers` for the Atari boards):
- NROM: fixed ROM at $8000-$FFFF (16 KiB images mirrored), 8 KiB battery RAM
  at $6000-$7FFF.
- Atari 4K: fixed 4 KiB ROM on A12.
- Atari F8: two 4 KiB ROM banks on A12, switched by hotspots $1FF8/$1FF9.
*/

use std::fmt;
use std::str::FromStr;

use log::trace;

use crate::error::CartridgeError;

/// Board variant tag, bound once when a cartridge is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapperKind {
    Nrom,
    Atari4k,
    AtariF8,
}

impl MapperKind {
    pub const ALL: [MapperKind; 3] = [MapperKind::Nrom, MapperKind::Atari4k, MapperKind::AtariF8];

    /// Canonical textual tag.
    pub fn tag(self) -> &'static str {
        match self {
            MapperKind::Nrom => "NROM",
            MapperKind::Atari4k => "4K",
            MapperKind::AtariF8 => "F8",
        }
    }

    /// Resolve an iNES mapper number. Only mapper 0 (NROM) is supported.
    pub fn from_ines_id(id: u16) -> Result<Self, CartridgeError> {
        match id {
            0 => Ok(MapperKind::Nrom),
            other => Err(CartridgeError::UnsupportedMapper(format!("iNES mapper {other}"))),
        }
    }
}

impl fmt::Display for MapperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for MapperKind {
    type Err = CartridgeError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        MapperKind::ALL
            .into_iter()
            .find(|k| k.tag().eq_ignore_ascii_case(tag))
            .ok_or_else(|| CartridgeError::UnsupportedMapper(s.to_string()))
    }
}

/// Common interface all cartridge boards implement.
///
/// Semantics:
/// - `read`/`write` take full CPU addresses (unmasked).
/// - Addresses the board does not decode read 0 and ignore writes.
/// - `reset()` zeroes writable storage and bank latches; ROM stays loaded.
pub trait Mapper {
    fn kind(&self) -> MapperKind;

    fn read(&mut self, addr: u16) -> u8;

    fn write(&mut self, addr: u16, value: u8);

    fn reset(&mut self) {}

    /// Copy a raw image into ROM storage.
    fn load_rom(&mut self, image: &[u8]) -> Result<(), CartridgeError>;

    /// Largest image `load_rom` accepts.
    fn rom_capacity(&self) -> usize;
}

pub const NROM_RAM_BASE: u16 = 0x6000;
pub const NROM_RAM_SIZE: usize = 0x2000;
pub const NROM_ROM_BASE: u16 = 0x8000;
pub const NROM_ROM_SIZE: usize = 0x8000;

/// NROM (iNES mapper 0).
///
/// - ROM: 32 KiB window at $8000..=$FFFF. A 16 KiB image appears twice.
/// - RAM: 8 KiB battery-backed RAM at $6000..=$7FFF.
/// - $4020..=$5FFF (expansion area) is not decoded.
#[derive(Clone, Debug)]
pub struct Nrom {
    prg_rom: Vec<u8>,
    prg_ram: Vec<u8>,
}

impl Default for Nrom {
    fn default() -> Self {
        Self::new()
    }
}

impl Nrom {
    /// Zeroed ROM and RAM.
    pub fn new() -> Self {
        Self {
            prg_rom: vec![0; NROM_ROM_SIZE],
            prg_ram: vec![0; NROM_RAM_SIZE],
        }
    }

    #[inline]
    fn prg_rom_read(&self, addr: u16) -> u8 {
        let rel = addr.wrapping_sub(NROM_ROM_BASE) as usize;
        let len = self.prg_rom.len();
        if len.is_power_of_two() {
            self.prg_rom[rel & (len - 1)]
        } else {
            self.prg_rom[rel % len]
        }
    }

    #[inline]
    fn prg_ram_index(addr: u16) -> usize {
        (addr - NROM_RAM_BASE) as usize % NROM_RAM_SIZE
    }

    /// True when the loaded image is 16 KiB (mirrored into both halves).
    pub fn is_nrom_128(&self) -> bool {
        self.prg_rom.len() == 16 * 1024
    }

    pub fn prg_ram(&self) -> &[u8] {
        &self.prg_ram
    }
}

impl Mapper for Nrom {
    #[inline]
    fn kind(&self) -> MapperKind {
        MapperKind::Nrom
    }

    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x6000..=0x7FFF => self.prg_ram[Self::prg_ram_index(addr)],
            0x8000..=0xFFFF => self.prg_rom_read(addr),
            _ => {
                trace!("NROM: unmapped read ${addr:04X}");
                0
            }
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x6000..=0x7FFF => self.prg_ram[Self::prg_ram_index(addr)] = value,
            0x8000..=0xFFFF => {
                // No registers on NROM; ROM writes are dropped.
            }
            _ => trace!("NROM: unmapped write ${addr:04X} = ${value:02X}"),
        }
    }

    fn reset(&mut self) {
        self.prg_ram.fill(0);
    }

    fn load_rom(&mut self, image: &[u8]) -> Result<(), CartridgeError> {
        if image.is_empty() || image.len() > NROM_ROM_SIZE {
            return Err(CartridgeError::RomSize {
                len: image.len(),
                capacity: NROM_ROM_SIZE,
            });
        }
        self.prg_rom = image.to_vec();
        Ok(())
    }

    fn rom_capacity(&self) -> usize {
        NROM_ROM_SIZE
    }
}
