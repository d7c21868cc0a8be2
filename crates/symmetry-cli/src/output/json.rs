//! JSON output adapter.

use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::Result;
use symmetry_core::{AnalysisRecord, ResultOutput};

/// JSON output adapter.
///
/// In lines mode every record is written as it arrives. In array mode
/// records are buffered and written as one array on `flush`.
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    buffered: Mutex<Option<Vec<AnalysisRecord>>>,
    pretty: bool,
}

impl JsonOutput {
    /// JSON Lines output to stdout.
    #[must_use]
    pub fn lines() -> Self {
        Self::new(Box::new(io::stdout()), false, false)
    }

    /// JSON array output to stdout.
    #[must_use]
    pub fn array(pretty: bool) -> Self {
        Self::new(Box::new(io::stdout()), true, pretty)
    }

    /// Creates an output writing to `writer`.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>, as_array: bool, pretty: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            buffered: Mutex::new(as_array.then(Vec::new)),
            pretty,
        }
    }

    #[allow(clippy::significant_drop_tightening)]
    fn write_line(&self, json: &str) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        Ok(())
    }
}

impl ResultOutput for JsonOutput {
    fn write(&self, record: &AnalysisRecord) -> Result<()> {
        {
            let mut buffered = self
                .buffered
                .lock()
                .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
            if let Some(records) = buffered.as_mut() {
                records.push(record.clone());
                return Ok(());
            }
        }
        self.write_line(&serde_json::to_string(record)?)
    }

    fn flush(&self) -> Result<()> {
        let pending = self
            .buffered
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?
            .take();

        if let Some(records) = pending {
            let json = if self.pretty {
                serde_json::to_string_pretty(&records)?
            } else {
                serde_json::to_string(&records)?
            };
            self.write_line(&json)?;
        }

        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}
