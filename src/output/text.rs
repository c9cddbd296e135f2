//! Text sinks for hierarchy and flat dumps.

use super::create_file;
use crate::utils::error::OutputError;
use log::info;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Open the dump destination: the given file, or stdout when `None`
///
/// **Public** - used by every command that prints lines
pub fn open_sink(path: Option<&Path>) -> Result<Box<dyn Write>, OutputError> {
    match path {
        Some(path) => {
            info!("Writing output to: {}", path.display());
            let file = create_file(path)?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
