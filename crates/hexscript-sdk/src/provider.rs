//! DataProvider trait — the opened binary as seen by host calls
//!
//! The bridge only needs the size of the data and a way to overwrite bytes.
//! Storage, caching and undo belong to the provider implementation.

use std::io;
use std::path::Path;

/// Access to the binary a loader script runs against.
pub trait DataProvider {
    /// Number of addressable bytes
    fn size(&self) -> u64;

    /// Overwrite bytes starting at `offset`.
    ///
    /// Callers have already checked `offset < self.size()`. A write that runs
    /// past the end grows the data, the way writing past EOF grows a file.
    fn write(&mut self, offset: u64, data: &[u8]);

    /// Human-readable name of the data source
    fn name(&self) -> &str {
        "<memory>"
    }
}

// ============================================================================
// MemoryProvider
// ============================================================================

/// A provider backed by an in-memory buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    name: String,
    data: Vec<u8>,
    dirty: bool,
}

impl MemoryProvider {
    /// Wrap a buffer.
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
            dirty: false,
        }
    }

    /// Read a whole file into memory.
    pub fn open(path: &Path) -> io::Result<Self> {
        let data = std::fs::read(path)?;
        log::debug!("opened {} ({} bytes)", path.display(), data.len());
        Ok(Self::new(path.display().to_string(), data))
    }

    /// Write the current contents to `path`.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, &self.data)
    }

    /// Current contents
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Whether any write happened since creation
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Consume the provider and return its contents
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl DataProvider for MemoryProvider {
    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn write(&mut self, offset: u64, data: &[u8]) {
        let span = usize::try_from(offset)
            .ok()
            .and_then(|start| start.checked_add(data.len()).map(|end| (start, end)));
        let Some((start, end)) = span else {
            log::warn!(
                "{}: write of {} bytes at {:#x} is not addressable, ignored",
                self.name,
                data.len(),
                offset
            );
            return;
        };
        if end > self.data.len() {
            self.data.resize(end, 0);
        }
        self.data[start..end].copy_from_slice(data);
        self.dirty = true;
    }

    fn name(&self) -> &str {
        &self.name
    }
}
