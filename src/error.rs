/*!
Error types for machine setup.

Only construction can fail: building a memory map, binding a register
window hook, creating a cartridge, pairing it with a profile or loading its
ROM image. Instruction
execution never returns an error; see `cpu::StepOutcome` for the illegal
opcode outcome.
*/

use thiserror::Error;

use crate::bus::map::{Profile, WindowId};
use crate::mapper::MapperKind;

pub type Result<T> = std::result::Result<T, Error>;

/// Umbrella error for machine construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("cartridge error: {0}")]
    Cartridge(#[from] CartridgeError),
    #[error("memory map error: {0}")]
    Map(#[from] MapError),
    #[error("bus error: {0}")]
    Bus(#[from] BusError),
    #[error("{mapper} board does not fit the {profile:?} address map")]
    ProfileMismatch { mapper: MapperKind, profile: Profile },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartridgeError {
    #[error("unsupported mapper type: {0}")]
    UnsupportedMapper(String),
    #[error("ROM image of {len} bytes does not fit a {capacity}-byte ROM window")]
    RomSize { len: usize, capacity: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("region at ${base:04X} has zero size")]
    EmptyRegion { base: u16 },
    #[error("region at ${base:04X}: span {span:#X} is not a multiple of size {size:#X}")]
    MirrorNotMultiple { base: u16, size: u32, span: u32 },
    #[error("region at ${base:04X} extends past the end of the address space")]
    OutOfRange { base: u16 },
    #[error("regions at ${first:04X} and ${second:04X} overlap")]
    Overlap { first: u16, second: u16 },
    #[error("memory map has no RAM region")]
    NoRam,
    #[error("RAM alias at ${base:04X} has size {size:#X}, RAM is {expected:#X}")]
    RamAliasSize { base: u16, size: u32, expected: u32 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BusError {
    #[error("register window {0:?} is not part of this memory map")]
    WindowNotMapped(WindowId),
}
