/*!
Cartridge: one board variant plus its storage, behind a uniform
read/write contract.

Features:
- Created from a `MapperKind`, a textual tag ("NROM", "4K", "F8",
  case-insensitive) or an iNES mapper number.
- The variant is fixed at construction; there is no way to rebind it.
- `load_rom` copies a raw ROM image into the board's ROM storage. Parsing
  container formats (iNES headers, .bin layouts) is the caller's job.

Notes:
- Dispatch is a plain `match` over the `Board` enum (`with_board!`); each
  arm calls the variant's `Mapper` impl statically.
- Reset zeroes writable storage and bank latches. ROM contents stay loaded.
*/

use log::info;

use crate::error::CartridgeError;
use crate::mapper::{Mapper, MapperKind, Nrom};
use crate::mappers::{Atari4k, AtariF8};

/// Run `$body` with `$m` bound to the active variant's mapper.
macro_rules! with_board {
    ($board:expr, $m:ident => $body:expr) => {
        match $board {
            Board::Nrom($m) => $body,
            Board::Atari4k($m) => $body,
            Board::AtariF8($m) => $body,
        }
    };
}

#[derive(Debug, Clone)]
enum Board {
    Nrom(Nrom),
    Atari4k(Atari4k),
    AtariF8(AtariF8),
}

#[derive(Debug, Clone)]
pub struct Cartridge {
    board: Board,
}

impl Cartridge {
    /// Blank cartridge of the given kind: ROM and RAM zeroed.
    pub fn new(kind: MapperKind) -> Self {
        let board = match kind {
            MapperKind::Nrom => Board::Nrom(Nrom::new()),
            MapperKind::Atari4k => Board::Atari4k(Atari4k::new()),
            MapperKind::AtariF8 => Board::AtariF8(AtariF8::new()),
        };
        info!("cartridge created: {kind}");
        Self { board }
    }

    /// Create from a mapper tag. Unknown tags fail with
    /// `CartridgeError::UnsupportedMapper`.
    pub fn from_tag(tag: &str) -> Result<Self, CartridgeError> {
        Ok(Self::new(tag.parse()?))
    }

    pub fn from_ines_id(id: u16) -> Result<Self, CartridgeError> {
        Ok(Self::new(MapperKind::from_ines_id(id)?))
    }

    /// Create and load in one go.
    pub fn with_rom(kind: MapperKind, image: &[u8]) -> Result<Self, CartridgeError> {
        let mut cart = Self::new(kind);
        cart.load_rom(image)?;
        Ok(cart)
    }

    pub fn kind(&self) -> MapperKind {
        with_board!(&self.board, m => m.kind())
    }

    pub fn rom_capacity(&self) -> usize {
        with_board!(&self.board, m => m.rom_capacity())
    }

    pub fn read(&mut self, addr: u16) -> u8 {
        with_board!(&mut self.board, m => m.read(addr))
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        with_board!(&mut self.board, m => m.write(addr, value))
    }

    pub fn reset(&mut self) {
        with_board!(&mut self.board, m => m.reset())
    }

    pub fn load_rom(&mut self, image: &[u8]) -> Result<(), CartridgeError> {
        with_board!(&mut self.board, m => m.load_rom(image))?;
        info!("{}: loaded {} byte ROM image", self.kind(), image.len());
        Ok(())
    }

    /// Currently selected bank for bank-switching boards.
    pub fn current_bank(&self) -> Option<usize> {
        match &self.board {
            Board::AtariF8(m) => Some(m.current_bank()),
            Board::Nrom(_) | Board::Atari4k(_) => None,
        }
    }
}
