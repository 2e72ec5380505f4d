/*!
RAM module: internal working RAM owned by the bus.

The size comes from the memory map's RAM region (128 bytes on the VCS
profile, 2 KiB on the NES profile). Mirroring is resolved by the map, so
`read`/`write` take a physical offset. Out-of-range offsets are folded
back into the array rather than panicking.
*/

/// Internal working RAM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ram {
    data: Vec<u8>,
}

impl Ram {
    /// Create `size` bytes of RAM initialized to 0.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    /// Clear RAM contents to 0.
    #[inline]
    pub fn reset(&mut self) {
        self.data.fill(0);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn read(&self, offset: u16) -> u8 {
        match self.index(offset) {
            Some(i) => self.data[i],
            None => 0,
        }
    }

    #[inline]
    pub fn write(&mut self, offset: u16, value: u8) {
        if let Some(i) = self.index(offset) {
            self.data[i] = value;
        }
    }

    /// Expose the internal slice (read-only). Useful for diagnostics or hashing.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn index(&self, offset: u16) -> Option<usize> {
        (!self.data.is_empty()).then(|| offset as usize % self.data.len())
    }
}
