/*!
Memory map: the ordered region table the bus decodes against.

Purpose
- Single source of address-decode truth for the CPU-visible 16-bit space.
- Describe each fixed region as `{ kind, base, size, span }`: `size` is the
  native window, `span` the mirrored extent (a whole multiple of `size`).
- Everything outside the listed regions is cartridge space, so decode is
  total by construction.

Validation (`MemoryMap::new`)
- Every region is non-empty and ends inside the 64 KiB space.
- Every `span` is a whole multiple of its `size`.
- Regions are pairwise disjoint.
- At least one RAM region exists. Further RAM regions are aliases of the
  same cells and must share its native size.

Profiles
- `Profile::Vcs`: TIA $0000/$80, RAM $0080/$80 (aliased at $0180 for the
  stack), RIOT $0200/$100.
- `Profile::Nes`: RAM $0000/$800 mirrored to $2000, PPU $2000/$8 mirrored
  to $4000, APU/IO $4000/$20, cartridge from $4020.
*/

use crate::error::MapError;

/// Size of the CPU address space.
pub const ADDRESS_SPACE: u32 = 0x1_0000;

/// Peripheral register windows a hook can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowId {
    /// Television interface adaptor registers.
    Tia,
    /// RAM-I/O-timer registers.
    Riot,
    /// Picture processing unit registers.
    Ppu,
    /// Audio and controller I/O registers.
    ApuIo,
}

impl WindowId {
    pub const COUNT: usize = 4;
    pub const ALL: [WindowId; WindowId::COUNT] =
        [WindowId::Tia, WindowId::Riot, WindowId::Ppu, WindowId::ApuIo];

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// What a fixed region routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    Ram,
    Window(WindowId),
}

/// Decode result: where an address goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Internal RAM at the given physical offset.
    Ram(u16),
    /// Register window at the given register offset.
    Window(WindowId, u16),
    /// Cartridge; the mapper sees the full address.
    Cartridge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub kind: RegionKind,
    pub base: u16,
    pub size: u32,
    pub span: u32,
}

impl Region {
    /// Unmirrored region: `span == size`.
    pub const fn new(kind: RegionKind, base: u16, size: u32) -> Self {
        Self {
            kind,
            base,
            size,
            span: size,
        }
    }

    pub const fn mirrored(kind: RegionKind, base: u16, size: u32, span: u32) -> Self {
        Self {
            kind,
            base,
            size,
            span,
        }
    }

    /// One past the last address covered (may be 0x10000).
    #[inline]
    pub fn end(&self) -> u32 {
        self.base as u32 + self.span
    }

    #[inline]
    pub fn contains(&self, addr: u16) -> bool {
        let a = addr as u32;
        a >= self.base as u32 && a < self.end()
    }

    /// Offset within the native window after folding mirrors.
    #[inline]
    pub fn offset(&self, addr: u16) -> u16 {
        ((addr as u32 - self.base as u32) % self.size) as u16
    }

    fn validate(&self) -> Result<(), MapError> {
        if self.size == 0 || self.span == 0 {
            return Err(MapError::EmptyRegion { base: self.base });
        }
        if self.span % self.size != 0 {
            return Err(MapError::MirrorNotMultiple {
                base: self.base,
                size: self.size,
                span: self.span,
            });
        }
        if self.end() > ADDRESS_SPACE {
            return Err(MapError::OutOfRange { base: self.base });
        }
        Ok(())
    }
}

/// Hardware profile: selects the fixed address map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    /// Atari 2600 style map (TIA / RAM / RIOT, cartridge on A12).
    Vcs,
    /// NES style map (mirrored RAM / PPU / APU-IO, cartridge from $4020).
    Nes,
}

impl Profile {
    pub fn memory_map(self) -> MemoryMap {
        let regions = match self {
            Profile::Vcs => VCS_REGIONS.to_vec(),
            Profile::Nes => NES_REGIONS.to_vec(),
        };
        MemoryMap { regions }
    }
}

pub const VCS_REGIONS: [Region; 4] = [
    Region::new(RegionKind::Window(WindowId::Tia), 0x0000, 0x0080),
    Region::new(RegionKind::Ram, 0x0080, 0x0080),
    // A8 is not decoded: the stack page top half lands on the same RAM.
    Region::new(RegionKind::Ram, 0x0180, 0x0080),
    Region::new(RegionKind::Window(WindowId::Riot), 0x0200, 0x0100),
];

pub const NES_REGIONS: [Region; 3] = [
    Region::mirrored(RegionKind::Ram, 0x0000, 0x0800, 0x2000),
    Region::mirrored(RegionKind::Window(WindowId::Ppu), 0x2000, 0x0008, 0x2000),
    Region::new(RegionKind::Window(WindowId::ApuIo), 0x4000, 0x0020),
];

/// Validated, ordered region table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryMap {
    regions: Vec<Region>,
}

impl MemoryMap {
    /// Build a custom map, checking every layout invariant.
    pub fn new(regions: Vec<Region>) -> Result<Self, MapError> {
        for r in &regions {
            r.validate()?;
        }

        let mut sorted: Vec<&Region> = regions.iter().collect();
        sorted.sort_by_key(|r| r.base);
        for pair in sorted.windows(2) {
            if pair[0].end() > pair[1].base as u32 {
                return Err(MapError::Overlap {
                    first: pair[0].base,
                    second: pair[1].base,
                });
            }
        }

        let mut ram = regions.iter().filter(|r| r.kind == RegionKind::Ram);
        let first = ram.next().ok_or(MapError::NoRam)?;
        if let Some(alias) = ram.find(|r| r.size != first.size) {
            return Err(MapError::RamAliasSize {
                base: alias.base,
                size: alias.size,
                expected: first.size,
            });
        }

        Ok(Self { regions })
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Native size of the RAM; every RAM region aliases the same cells.
    pub fn ram_size(&self) -> usize {
        self.regions
            .iter()
            .find(|r| r.kind == RegionKind::Ram)
            .map_or(0, |r| r.size as usize)
    }

    pub fn has_window(&self, id: WindowId) -> bool {
        self.regions
            .iter()
            .any(|r| r.kind == RegionKind::Window(id))
    }

    /// Map an address to exactly one target. First matching region wins;
    /// anything unclaimed belongs to the cartridge.
    pub fn decode(&self, addr: u16) -> Target {
        match self.regions.iter().find(|r| r.contains(addr)) {
            Some(r) => {
                let offset = r.offset(addr);
                debug_assert!((offset as u32) < r.size);
                match r.kind {
                    RegionKind::Ram => Target::Ram(offset),
                    RegionKind::Window(id) => Target::Window(id, offset),
                }
            }
            None => Target::Cartridge,
        }
    }
}
