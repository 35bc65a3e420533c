use crate::core::models::structure::StructureModel;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing structure file formats.
///
/// Some formats need context that the file itself does not carry (the SDF
/// reader, for instance, takes the display formula from the lookup service),
/// so readers are values rather than unit types.
pub trait StructureFile {
    /// Diagnostics produced while reading.
    type Metadata;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Parses a structure from in-memory text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a usable structure in this format.
    fn read_str(&self, text: &str) -> Result<(StructureModel, Self::Metadata), Self::Error>;

    /// Writes a structure to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying writer fails.
    fn write_to(&self, model: &StructureModel, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads a structure from a buffered reader.
    ///
    /// The whole input is buffered before parsing; structure files are small.
    fn read_from(
        &self,
        reader: &mut impl BufRead,
    ) -> Result<(StructureModel, Self::Metadata), Self::Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.read_str(&text)
    }

    /// Reads a structure from a file path.
    fn read_from_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<(StructureModel, Self::Metadata), Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        self.read_from(&mut reader)
    }

    /// Writes a structure to a file path, creating or truncating the file.
    fn write_to_path<P: AsRef<Path>>(
        &self,
        model: &StructureModel,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(model, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
