//! Renderer module
//!
//! Writes flattened leaves in different output formats: jsonl, json, raw

use serde::Serialize;
use serde_json::Value;
use std::io::Write;

use crate::core::element::Element;
use crate::error::FlattenError;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with default options
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for leaf streams
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render leaves to a string
    pub fn render<'a, N, I>(&self, leaves: I) -> Result<String, FlattenError>
    where
        N: Serialize + 'a,
        I: IntoIterator<Item = Element<'a, N>>,
    {
        let mut buffer = Vec::new();
        self.render_to(leaves, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Render leaves to a writer, returning how many were written.
    ///
    /// jsonl and raw pull one leaf at a time; json buffers the whole array.
    pub fn render_to<'a, N, I, W>(&self, leaves: I, mut writer: W) -> Result<usize, FlattenError>
    where
        N: Serialize + 'a,
        I: IntoIterator<Item = Element<'a, N>>,
        W: Write,
    {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(leaves, &mut writer),
            OutputFormat::Json => self.render_json(leaves, &mut writer),
            OutputFormat::Raw => self.render_raw(leaves, &mut writer),
        }
    }

    /// One JSON value per line; pretty values are separated by a blank line
    fn render_jsonl<'a, N, I, W>(&self, leaves: I, writer: &mut W) -> Result<usize, FlattenError>
    where
        N: Serialize + 'a,
        I: IntoIterator<Item = Element<'a, N>>,
        W: Write,
    {
        let mut count = 0;
        for leaf in leaves {
            if self.config.pretty {
                if count > 0 {
                    writer.write_all(b"\n")?;
                }
                serde_json::to_writer_pretty(&mut *writer, &leaf).map_err(FlattenError::Render)?;
            } else {
                serde_json::to_writer(&mut *writer, &leaf).map_err(FlattenError::Render)?;
            }
            writer.write_all(b"\n")?;
            count += 1;
        }
        Ok(count)
    }

    /// A single JSON array
    fn render_json<'a, N, I, W>(&self, leaves: I, writer: &mut W) -> Result<usize, FlattenError>
    where
        N: Serialize + 'a,
        I: IntoIterator<Item = Element<'a, N>>,
        W: Write,
    {
        let leaves: Vec<Element<'a, N>> = leaves.into_iter().collect();
        if self.config.pretty {
            serde_json::to_writer_pretty(&mut *writer, &leaves).map_err(FlattenError::Render)?;
        } else {
            serde_json::to_writer(&mut *writer, &leaves).map_err(FlattenError::Render)?;
        }
        writer.write_all(b"\n")?;
        Ok(leaves.len())
    }

    /// Strings unquoted, everything else as compact JSON, one per line
    fn render_raw<'a, N, I, W>(&self, leaves: I, writer: &mut W) -> Result<usize, FlattenError>
    where
        N: Serialize + 'a,
        I: IntoIterator<Item = Element<'a, N>>,
        W: Write,
    {
        let mut count = 0;
        for leaf in leaves {
            match serde_json::to_value(leaf).map_err(FlattenError::Render)? {
                Value::String(s) => writer.write_all(s.as_bytes())?,
                other => serde_json::to_writer(&mut *writer, &other).map_err(FlattenError::Render)?,
            }
            writer.write_all(b"\n")?;
            count += 1;
        }
        Ok(count)
    }
}
