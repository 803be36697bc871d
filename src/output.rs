use anyhow::anyhow;
use formatx::formatx;
use std::fmt::Debug;
use std::fs::{create_dir_all, File};
use std::io;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Destination for the files produced by a run, addressed by a location key (e.g. a zone name)
/// and a file extension.
pub trait Output: Debug {
    fn writer_for_location_key(
        &self,
        location_key: &str,
        file_extension: &str,
    ) -> anyhow::Result<impl Write>;

    /// Whether writing to this output can be skipped entirely.
    fn is_noop(&self) -> bool {
        false
    }
}

/// Writes each location to its own file in a directory. The file template takes two
/// placeholders, for the location key and the file extension, e.g. `"office__{}.{}"`.
#[derive(Debug)]
pub struct FileOutput {
    directory_path: PathBuf,
    file_template: String,
}

impl FileOutput {
    pub fn new(directory_path: PathBuf, file_template: String) -> Self {
        Self {
            directory_path,
            file_template,
        }
    }
}

impl Output for FileOutput {
    fn writer_for_location_key(
        &self,
        location_key: &str,
        file_extension: &str,
    ) -> anyhow::Result<impl Write> {
        let file_name = formatx!(&self.file_template, location_key, file_extension)
            .map_err(|err| anyhow!("Invalid output file template {}: {err:?}", self.file_template))?;
        create_dir_all(&self.directory_path)?;

        Ok(BufWriter::new(File::create(
            self.directory_path.join(file_name),
        )?))
    }
}

impl Output for &FileOutput {
    fn writer_for_location_key(
        &self,
        location_key: &str,
        file_extension: &str,
    ) -> anyhow::Result<impl Write> {
        <FileOutput as Output>::writer_for_location_key(self, location_key, file_extension)
    }
}

/// An output that discards everything written to it.
#[derive(Debug, Default)]
pub struct SinkOutput;

impl Output for SinkOutput {
    fn writer_for_location_key(
        &self,
        _location_key: &str,
        _file_extension: &str,
    ) -> anyhow::Result<impl Write> {
        Ok(io::sink())
    }

    fn is_noop(&self) -> bool {
        true
    }
}
