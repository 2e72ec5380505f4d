#![doc = r#"
Bus module: CPU-visible address space.

Overview
- `Bus` owns internal RAM, the validated memory map for one hardware profile,
  the peripheral register hooks and the attached cartridge.
- Every CPU access goes through `Bus::read` / `Bus::write`, which decode the
  address with the map (first matching region wins, remainder is cartridge
  space) and forward it to exactly one target.

Modules and responsibilities
- map: `MemoryMap`, `Region`, `Profile` and the decode `Target`.
- ram: internal working RAM sized from the map.
- interfaces: `RegisterWindow`, the hook trait for peripheral register windows.

Unbound targets
- Register window without a hook: reads `STUB_READ` (0x00), writes ignored.
- No cartridge attached: reads `OPEN_BUS` (0xFF), writes ignored.

Interrupt lines
- `InterruptLines` holds the RESET and NMI latches and the IRQ level set by
  the driving code. Hooks can additionally hold IRQ asserted through
  `RegisterWindow::irq_asserted`. The CPU samples the lines between
  instructions (`Cpu::poll_interrupts`).
"#]

pub mod interfaces;
pub mod map;
pub mod ram;

#[cfg(test)]
mod tests;

use crate::cartridge::Cartridge;
use crate::error::BusError;

pub use interfaces::{LatchedRegisters, RegisterWindow, STUB_READ};
pub use map::{MemoryMap, Profile, Region, RegionKind, Target, WindowId};
pub use ram::Ram;

/// Value read from cartridge space when no cartridge is attached.
pub const OPEN_BUS: u8 = 0xFF;

/// Pending interrupt requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterruptLines {
    /// Latched until the CPU takes it.
    pub reset: bool,
    /// Latched until the CPU takes it.
    pub nmi: bool,
    /// Level-triggered; the source clears it.
    pub irq: bool,
}

pub struct Bus {
    map: MemoryMap,
    ram: Ram,
    windows: [Option<Box<dyn RegisterWindow>>; WindowId::COUNT],
    cartridge: Option<Cartridge>,
    pub interrupts: InterruptLines,
}

impl Bus {
    /// Bus for one of the built-in hardware profiles, with no cartridge and
    /// no hooks.
    pub fn new(profile: Profile) -> Self {
        Self::with_map(profile.memory_map())
    }

    /// Bus over an already validated custom map.
    pub fn with_map(map: MemoryMap) -> Self {
        let ram = Ram::new(map.ram_size());
        Self {
            map,
            ram,
            windows: std::array::from_fn(|_| None),
            cartridge: None,
            interrupts: InterruptLines::default(),
        }
    }

    /// Zero RAM, clear interrupt lines, reset the cartridge and every hook.
    /// Attachments stay in place.
    pub fn reset(&mut self) {
        self.ram.reset();
        self.interrupts = InterruptLines::default();
        if let Some(cart) = self.cartridge.as_mut() {
            cart.reset();
        }
        for hook in self.windows.iter_mut().flatten() {
            hook.reset();
        }
    }

    pub fn map(&self) -> &MemoryMap {
        &self.map
    }

    pub fn ram(&self) -> &Ram {
        &self.ram
    }

    #[inline]
    pub fn decode(&self, addr: u16) -> Target {
        self.map.decode(addr)
    }

    // ---------------------------------------------------------------------
    // Attachments
    // ---------------------------------------------------------------------

    /// Insert a cartridge, returning the one it replaces.
    pub fn attach_cartridge(&mut self, cart: Cartridge) -> Option<Cartridge> {
        self.cartridge.replace(cart)
    }

    pub fn detach_cartridge(&mut self) -> Option<Cartridge> {
        self.cartridge.take()
    }

    pub fn cartridge(&self) -> Option<&Cartridge> {
        self.cartridge.as_ref()
    }

    pub fn cartridge_mut(&mut self) -> Option<&mut Cartridge> {
        self.cartridge.as_mut()
    }

    /// Bind a hook to a register window present in this map. Any previous
    /// hook for the window is dropped.
    pub fn attach_window(
        &mut self,
        id: WindowId,
        hook: Box<dyn RegisterWindow>,
    ) -> Result<(), BusError> {
        if !self.map.has_window(id) {
            return Err(BusError::WindowNotMapped(id));
        }
        self.windows[id.index()] = Some(hook);
        Ok(())
    }

    /// Unbind a window's hook; the window reverts to stub behavior.
    pub fn detach_window(&mut self, id: WindowId) -> Option<Box<dyn RegisterWindow>> {
        self.windows[id.index()].take()
    }

    // ---------------------------------------------------------------------
    // CPU-visible access
    // ---------------------------------------------------------------------

    pub fn read(&mut self, addr: u16) -> u8 {
        match self.map.decode(addr) {
            Target::Ram(offset) => self.ram.read(offset),
            Target::Window(id, offset) => match self.windows[id.index()].as_mut() {
                Some(hook) => hook.read(offset),
                None => STUB_READ,
            },
            Target::Cartridge => match self.cartridge.as_mut() {
                Some(cart) => cart.read(addr),
                None => OPEN_BUS,
            },
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        match self.map.decode(addr) {
            Target::Ram(offset) => self.ram.write(offset, value),
            Target::Window(id, offset) => {
                if let Some(hook) = self.windows[id.index()].as_mut() {
                    hook.write(offset, value);
                }
            }
            Target::Cartridge => {
                if let Some(cart) = self.cartridge.as_mut() {
                    cart.write(addr, value);
                }
            }
        }
    }

    /// Little-endian word read; the high byte address wraps at $FFFF.
    pub fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    // ---------------------------------------------------------------------
    // Interrupt lines
    // ---------------------------------------------------------------------

    pub fn request_reset(&mut self) {
        self.interrupts.reset = true;
    }

    pub fn request_nmi(&mut self) {
        self.interrupts.nmi = true;
    }

    pub fn set_irq(&mut self, level: bool) {
        self.interrupts.irq = level;
    }

    /// IRQ line level: the driven line or any hook holding it.
    pub fn irq_asserted(&self) -> bool {
        self.interrupts.irq || self.windows.iter().flatten().any(|h| h.irq_asserted())
    }
}
