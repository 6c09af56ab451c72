//! Durable storage sinks for named byte blobs.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::util::Result;

/// Abstract durable storage target.
///
/// One call stores one named blob; writes are synchronous, so ordering between
/// frames is exactly the caller's call order.
pub trait Sink {
    /// Durably store `data` under `name`.
    fn write(&mut self, name: &str, data: &[u8]) -> Result<()>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write(&mut self, name: &str, data: &[u8]) -> Result<()> {
        (**self).write(name, data)
    }
}

/// Sink writing each blob as a file in one output directory.
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    /// Create a sink for the given directory, creating the directory tree
    /// if it does not exist.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Sink for FileSink {
    fn write(&mut self, name: &str, data: &[u8]) -> Result<()> {
        let path = self.dir.join(name);
        trace!(name, bytes = data.len(), "writing blob to file");
        fs::write(path, data)?;
        Ok(())
    }
}

/// In-memory sink recording every write in order.
#[derive(Debug, Default)]
pub struct MemorySink {
    writes: Vec<(String, Vec<u8>)>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes performed (repeated names count separately).
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Check if no writes happened.
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Written names, in write order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.writes.iter().map(|(name, _)| name.as_str())
    }

    /// The most recent bytes written under `name`.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.writes
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data.as_slice())
    }

    /// Number of writes performed under `name`.
    pub fn count(&self, name: &str) -> usize {
        self.writes.iter().filter(|(n, _)| n == name).count()
    }
}

impl Sink for MemorySink {
    fn write(&mut self, name: &str, data: &[u8]) -> Result<()> {
        trace!(name, bytes = data.len(), "writing blob to memory");
        self.writes.push((name.to_string(), data.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_order_and_duplicates() {
        let mut sink = MemorySink::new();
        sink.write("a", &[1]).unwrap();
        sink.write("b", &[2]).unwrap();
        sink.write("a", &[3]).unwrap();

        assert_eq!(sink.len(), 3);
        assert_eq!(sink.count("a"), 2);
        assert_eq!(sink.get("a"), Some(&[3u8][..]));
        assert_eq!(sink.names().collect::<Vec<_>>(), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_mut_ref_is_a_sink() {
        let mut sink = MemorySink::new();
        {
            let mut by_ref: &mut MemorySink = &mut sink;
            by_ref.write("x", &[9]).unwrap();
        }
        assert_eq!(sink.get("x"), Some(&[9u8][..]));
    }
}
