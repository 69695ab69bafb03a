use crate::core::render::Summary;
use crate::core::EstimateSink;
use crate::domain::model::EstimateResult;
use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonEstimate<'a> {
    #[serde(flatten)]
    result: &'a EstimateResult,
    summary: &'a Summary,
}

/// 把估價結果寫到任意 `Write`（CLI 用 stdout）
pub struct ConsoleSink<W: Write + Send> {
    writer: Mutex<W>,
    format: OutputFormat,
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer: Mutex::new(writer),
            format,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ConsoleSink<std::io::Stdout> {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(std::io::stdout(), format)
    }
}

impl<W: Write + Send> EstimateSink for ConsoleSink<W> {
    fn publish(&self, result: &EstimateResult, summary: &Summary) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match self.format {
            OutputFormat::Text => writeln!(writer, "{}", summary)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *writer, &JsonEstimate { result, summary })?;
                writeln!(writer)?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}
