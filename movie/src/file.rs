use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use warn::Warn;

use crate::format::Warning;
use crate::movie::Movie;
use crate::reader::ReadError;
use crate::reader::Reader;
use crate::WriteError;

impl Movie {
    /// Serializes the movie and writes it to `path`.
    ///
    /// The file is written to a temporary file in the destination directory
    /// first and renamed into place, so `path` is either fully written or
    /// left untouched.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), WriteError> {
        let path = path.as_ref();
        let data = self.serialize()?;
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(&data)?;
        file.persist(path).map_err(|e| e.error)?;
        info!("wrote {} ({} bytes)", path.display(), data.len());
        Ok(())
    }
}

impl Reader {
    pub fn open<W, P>(path: P, warn: &mut W) -> Result<Reader, ReadError>
    where
        W: Warn<Warning>,
        P: AsRef<Path>,
    {
        Reader::new(BufReader::new(File::open(path)?), warn)
    }
}
