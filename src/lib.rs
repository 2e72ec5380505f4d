#![doc = r#"
mos-console library crate.

A 6502 control core for game-console simulators: the CPU, the memory bus it
executes against and the cartridge boards that sit in cartridge space.

Modules:
- bus: address decode for a hardware profile, internal RAM, register window
  hooks, cartridge slot and interrupt lines
- cartridge: one board variant behind a uniform read/write contract
- cpu: 6502 CPU core (facade + state + opcode table + dispatch + execute modules)
- error: construction-time error types
- machine: CPU + bus pair with power-on and a run loop
- mapper: Mapper trait, board kinds and NROM
- mappers: Atari 2600 boards (4K, F8)

In tests, shared ROM builders are available under `crate::test_utils`.
"#]

// Core modules
pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod error;
pub mod machine;
pub mod mapper;
pub mod mappers;

// Re-export commonly used types at the crate root for convenience.
pub use bus::{Bus, MemoryMap, Profile, RegisterWindow, WindowId};
pub use cartridge::Cartridge;
pub use cpu::{Cpu, Interrupt, StepOutcome};
pub use error::{BusError, CartridgeError, Error, MapError, Result};
pub use machine::{Machine, MachineConfig, MachineStep};
pub use mapper::MapperKind;

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
