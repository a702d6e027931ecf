//! Output formatting and writing utilities
//!
//! Data (refactored records, validation summaries) is written to stdout in
//! the selected format. Status messages go to stderr so that stdout can be
//! piped into other tools.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, trace};

/// Trait for formatting serializable output
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        let mut formatted = match self {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::JsonPretty => serde_json::to_string_pretty(value)?,
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
        };
        if !formatted.ends_with('\n') {
            formatted.push('\n');
        }
        Ok(formatted)
    }
}

impl OutputFormat {
    /// Format implied by a file extension, falling back to `self`
    pub fn for_path(self, path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => OutputFormat::Yaml,
            Some("json") if self == OutputFormat::Yaml => OutputFormat::JsonPretty,
            _ => self,
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
    status: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a writer on stdout, with status messages on stderr
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writers(format, use_color, quiet, Box::new(io::stdout()), Box::new(io::stderr()))
    }

    /// Create an output writer with custom data and status sinks
    pub fn with_writers(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
        status: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
            status,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    fn status_line(&mut self, content: &str) -> Result<()> {
        writeln!(self.status, "{}", content)?;
        self.status.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet {
            return Ok(());
        }

        if self.use_color {
            self.status_line(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.status_line(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_color {
            self.status_line(&message.green().to_string())
        } else {
            self.status_line(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.use_color {
            self.status_line(&message.yellow().to_string())
        } else {
            self.status_line(&format!("WARNING: {}", message))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!("Outputting {} bytes of {:?}", formatted.len(), self.format);
        self.write(&formatted)
    }

    /// Write data to a file, picking the format from its extension
    pub fn save<T: Serialize>(&mut self, path: &Path, value: &T) -> Result<()> {
        let format = self.format.for_path(path);
        let formatted = format.format(value)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, formatted)?;

        debug!("Saved {:?} output to {}", format, path.display());
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Shared in-memory sink so tests can inspect what was written
    #[derive(Clone, Default)]
    pub(crate) struct Sink(Arc<Mutex<Vec<u8>>>);

    impl Sink {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, Sink, Sink) {
        let data = Sink::default();
        let status = Sink::default();
        let output = OutputWriter::with_writers(format, false, quiet, Box::new(data.clone()), Box::new(status.clone()));
        (output, data, status)
    }

    #[test]
    fn test_formats() {
        let value = json!({"b": 1, "a": [true]});
        assert_eq!(OutputFormat::Json.format(&value).unwrap(), "{\"b\":1,\"a\":[true]}\n");
        assert_eq!(
            OutputFormat::JsonPretty.format(&value).unwrap(),
            "{\n  \"b\": 1,\n  \"a\": [\n    true\n  ]\n}\n"
        );
        assert_eq!(OutputFormat::Yaml.format(&value).unwrap(), "b: 1\na:\n- true\n");
    }

    #[test]
    fn test_data_goes_to_writer_and_status_to_stderr_sink() {
        let (mut output, data, status) = writer(OutputFormat::Json, false);
        output.info("loading").unwrap();
        output.data(&json!({"x": 1})).unwrap();
        output.success("done").unwrap();

        assert_eq!(data.contents(), "{\"x\":1}\n");
        assert_eq!(status.contents(), "INFO: loading\ndone\n");
    }

    #[test]
    fn test_quiet_keeps_data_and_warnings() {
        let (mut output, data, status) = writer(OutputFormat::Json, true);
        output.info("hidden").unwrap();
        output.success("hidden").unwrap();
        output.warning("shown").unwrap();
        output.data(&json!(null)).unwrap();

        assert_eq!(data.contents(), "null\n");
        assert_eq!(status.contents(), "WARNING: shown\n");
    }

    #[test]
    fn test_format_for_path() {
        assert_eq!(OutputFormat::Json.for_path(Path::new("out.yaml")), OutputFormat::Yaml);
        assert_eq!(OutputFormat::Json.for_path(Path::new("out.yml")), OutputFormat::Yaml);
        assert_eq!(OutputFormat::Yaml.for_path(Path::new("out.json")), OutputFormat::JsonPretty);
        assert_eq!(OutputFormat::Json.for_path(Path::new("out.json")), OutputFormat::Json);
        assert_eq!(OutputFormat::Json.for_path(Path::new("out")), OutputFormat::Json);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out.yaml");

        let (mut output, data, _) = writer(OutputFormat::Json, false);
        output.save(&path, &json!({"k": "v"})).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "k: v\n");
        assert!(data.contents().is_empty());
    }
}
