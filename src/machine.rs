/*!
Machine: one CPU, one bus and one cartridge for a hardware profile.

The machine is the driving loop around the core: it powers everything on,
samples the interrupt lines between instructions and accumulates cycles.

```rust
use mos_console::{Machine, MachineConfig, Profile};

let mut machine = Machine::new(MachineConfig::new(Profile::Nes)).unwrap();
machine
    .bus_mut()
    .cartridge_mut()
    .unwrap()
    .load_rom(&[0xEA; 0x4000])
    .unwrap();
machine.power_on();
machine.run(10);
```
*/

use log::info;

use crate::bus::{Bus, MemoryMap, Profile};
use crate::cartridge::Cartridge;
use crate::cpu::{Cpu, Interrupt};
use crate::error::{Error, Result};
use crate::mapper::MapperKind;

impl Profile {
    /// Board a profile gets when the configuration names none.
    pub fn default_mapper(self) -> MapperKind {
        match self {
            Profile::Vcs => MapperKind::Atari4k,
            Profile::Nes => MapperKind::Nrom,
        }
    }
}

impl MapperKind {
    /// Console whose cartridge slot this board is built for.
    pub fn profile(self) -> Profile {
        match self {
            MapperKind::Nrom => Profile::Nes,
            MapperKind::Atari4k | MapperKind::AtariF8 => Profile::Vcs,
        }
    }
}

/// Machine construction parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    pub profile: Profile,
    /// Board to insert; `None` picks the profile default.
    pub mapper: Option<MapperKind>,
    /// Replaces the profile's built-in address map when set.
    pub map: Option<MemoryMap>,
}

impl MachineConfig {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            mapper: None,
            map: None,
        }
    }

    pub fn with_mapper(mut self, kind: MapperKind) -> Self {
        self.mapper = Some(kind);
        self
    }

    pub fn with_map(mut self, map: MemoryMap) -> Self {
        self.map = Some(map);
        self
    }

    pub fn mapper_kind(&self) -> MapperKind {
        self.mapper.unwrap_or_else(|| self.profile.default_mapper())
    }
}

/// Outcome of one `Machine::step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineStep {
    /// Interrupt entered before the instruction, if any.
    pub interrupt: Option<Interrupt>,
    /// Cycles for the interrupt entry plus the instruction.
    pub cycles: u32,
    /// Opcode of an undocumented instruction that was skipped.
    pub illegal: Option<u8>,
}

pub struct Machine {
    config: MachineConfig,
    cpu: Cpu,
    bus: Bus,
    cycles: u64,
}

impl Machine {
    /// Fails when the chosen board belongs to the other profile.
    pub fn new(config: MachineConfig) -> Result<Self> {
        let kind = config.mapper_kind();
        if kind.profile() != config.profile {
            return Err(Error::ProfileMismatch {
                mapper: kind,
                profile: config.profile,
            });
        }
        let mut bus = match &config.map {
            Some(map) => Bus::with_map(map.clone()),
            None => Bus::new(config.profile),
        };
        bus.attach_cartridge(Cartridge::new(kind));
        Ok(Self {
            config,
            cpu: Cpu::new(),
            bus,
            cycles: 0,
        })
    }

    /// Build with a ROM image already loaded.
    pub fn with_rom(config: MachineConfig, image: &[u8]) -> Result<Self> {
        let mut machine = Self::new(config)?;
        if let Some(cart) = machine.bus.cartridge_mut() {
            cart.load_rom(image)?;
        }
        Ok(machine)
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    /// Total cycles since power-on.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Zero CPU, RAM and cartridge state, then take the RESET interrupt.
    pub fn power_on(&mut self) {
        self.cpu.reset();
        self.bus.reset();
        self.cycles = 0;
        self.bus.request_reset();
        if let Some((_, cycles)) = self.cpu.poll_interrupts(&mut self.bus) {
            self.cycles += cycles as u64;
        }
        info!(
            "{:?} machine powered on, PC=${:04X}",
            self.config.profile,
            self.cpu.pc()
        );
    }

    /// Service a pending interrupt (RESET > NMI > IRQ), then execute one
    /// instruction.
    pub fn step(&mut self) -> MachineStep {
        let (interrupt, entry) = match self.cpu.poll_interrupts(&mut self.bus) {
            Some((kind, cycles)) => (Some(kind), cycles),
            None => (None, 0),
        };
        let outcome = self.cpu.step(&mut self.bus);
        let cycles = entry + outcome.cycles();
        self.cycles += cycles as u64;
        MachineStep {
            interrupt,
            cycles,
            illegal: outcome.is_illegal().then(|| outcome.opcode()),
        }
    }

    /// Execute up to `max_instructions` steps and return the cycles spent.
    pub fn run(&mut self, max_instructions: usize) -> u64 {
        (0..max_instructions)
            .map(|_| self.step().cycles as u64)
            .sum()
    }
}
