//! Runs `doxygen` over C sources to produce the XML output.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::ParserError;
use crate::index::DoxygenIndex;

/// One Doxygen XML extraction.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Doxygen executable, looked up on `PATH` when not a path.
    pub doxygen: PathBuf,
    /// Working directory of the run, also used as the include path.
    pub source_directory: PathBuf,
    /// Input files, relative to `source_directory`.
    pub sources: Vec<String>,
    /// Preprocessor symbols defined during parsing (`NAME` or `NAME=value`).
    pub predefined: Vec<String>,
    pub xml_output: PathBuf,
    pub project_name: String,
}

impl Extraction {
    /// Configuration fed to `doxygen -` on stdin.
    ///
    /// # Errors
    /// Returns `ParserError::Io` if `xml_output` is relative and the current
    /// directory cannot be determined.
    pub fn doxyfile(&self) -> Result<String, ParserError> {
        let xml_output = std::path::absolute(&self.xml_output)?;
        let predefined = self
            .predefined
            .iter()
            .map(|symbol| format!("\"{symbol}\""))
            .collect::<Vec<_>>()
            .join(" ");

        let mut doxyfile = String::new();
        for (key, value) in [
            ("PROJECT_NAME", self.project_name.clone()),
            ("GENERATE_XML", "YES".to_string()),
            ("GENERATE_LATEX", "NO".to_string()),
            ("GENERATE_HTML", "NO".to_string()),
            ("INCLUDE_PATH", self.source_directory.display().to_string()),
            ("INPUT", self.sources.join(" ")),
            ("XML_OUTPUT", xml_output.display().to_string()),
            ("EXTRACT_ALL", "YES".to_string()),
            ("QUIET", "NO".to_string()),
            ("AUTOLINK_SUPPORT", "NO".to_string()),
            ("MACRO_EXPANSION", "YES".to_string()),
            ("SKIP_FUNCTION_MACROS", "NO".to_string()),
            ("PREDEFINED", predefined),
        ] {
            let _ = writeln!(doxyfile, "{key} = {value}");
        }
        Ok(doxyfile)
    }

    /// Run Doxygen and open the resulting index.
    ///
    /// # Errors
    /// `Io` if the output directory cannot be created or the executable
    /// cannot be started, `ExtractionFailed` on a non-zero exit, and any
    /// [`DoxygenIndex::open`] error afterwards.
    pub fn run(&self) -> Result<DoxygenIndex, ParserError> {
        fs::create_dir_all(&self.xml_output)?;
        let doxyfile = self.doxyfile()?;

        tracing::info!(
            doxygen = %self.doxygen.display(),
            sources = self.sources.len(),
            output = %self.xml_output.display(),
            "running doxygen"
        );
        let mut child = Command::new(&self.doxygen)
            .arg("-")
            .current_dir(&self.source_directory)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            write_config(&mut stdin, &doxyfile)?;
        }
        let output = child.wait_with_output()?;

        let mut log = String::from_utf8_lossy(&output.stdout).into_owned();
        log.push_str(&String::from_utf8_lossy(&output.stderr));
        if !output.status.success() {
            tracing::warn!(status = %output.status, "doxygen failed");
            return Err(ParserError::ExtractionFailed {
                status: output.status.to_string(),
                output: log.trim().to_string(),
            });
        }
        tracing::debug!(output = %log.trim(), "doxygen finished");

        DoxygenIndex::open(&self.xml_output)
    }
}

/// Doxygen may exit before reading all of stdin; the exit status decides.
fn write_config(stdin: &mut impl io::Write, doxyfile: &str) -> Result<(), ParserError> {
    match stdin.write_all(doxyfile.as_bytes()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.map_err(ParserError::from),
    }
}
