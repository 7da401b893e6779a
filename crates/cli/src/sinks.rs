//! Concrete `LayerSink`s for the command line.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use wktsnap::{LayerSink, SinkError};

fn io_err(err: std::io::Error) -> SinkError {
    SinkError::new(err.to_string())
}

/// One `{"layer": …, "wkt": …}` object per line.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> LayerSink for JsonLinesSink<W> {
    fn show_wkt(&mut self, wkt: &str, layer: &str) -> Result<(), SinkError> {
        let line = serde_json::json!({ "layer": layer, "wkt": wkt });
        writeln!(self.out, "{}", line).map_err(io_err)
    }
}

/// Emits a script for the QGIS Python console, one `iface.show_wkt` per layer.
///
/// Trailing whitespace of the WKT is trimmed so each call stays on one line.
pub struct QgisScriptSink<W: Write> {
    out: W,
    header_written: bool,
}

impl<W: Write> QgisScriptSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            header_written: false,
        }
    }
}

/// Single-quoted Python string literal.
pub fn py_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

impl<W: Write> LayerSink for QgisScriptSink<W> {
    fn show_wkt(&mut self, wkt: &str, layer: &str) -> Result<(), SinkError> {
        if !self.header_written {
            writeln!(self.out, "# generated by wktsnap {}", wktsnap::VERSION).map_err(io_err)?;
            self.header_written = true;
        }
        writeln!(
            self.out,
            "iface.show_wkt({}, {})",
            py_quote(wkt.trim_end()),
            py_quote(layer)
        )
        .map_err(io_err)
    }
}

/// Row of the layer table.
#[derive(Clone, Debug)]
pub struct LayerRow {
    pub order: u32,
    pub layer: String,
    pub wkt: String,
}

/// Forwards to `inner` and keeps a table of everything shown.
///
/// `inner` gets the WKT untouched; table rows hold it with trailing whitespace trimmed.
pub struct TableSink<S> {
    inner: S,
    rows: Vec<LayerRow>,
}

impl<S: LayerSink> TableSink<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            rows: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[LayerRow] {
        &self.rows
    }
}

impl<S: LayerSink> LayerSink for TableSink<S> {
    fn show_wkt(&mut self, wkt: &str, layer: &str) -> Result<(), SinkError> {
        self.inner.show_wkt(wkt, layer)?;
        self.rows.push(LayerRow {
            order: self.rows.len() as u32,
            layer: layer.to_string(),
            wkt: wkt.trim_end().to_string(),
        });
        Ok(())
    }
}

/// Write rows as Parquet (`.parquet`) or CSV (anything else).
pub fn write_table(rows: &[LayerRow], path: &Path) -> Result<()> {
    let mut df = df!(
        "order" => rows.iter().map(|r| r.order).collect::<Vec<u32>>(),
        "layer" => rows.iter().map(|r| r.layer.clone()).collect::<Vec<String>>(),
        "wkt" => rows.iter().map(|r| r.wkt.clone()).collect::<Vec<String>>()
    )?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating table dir {}", parent.display()))?;
        }
    }
    let mut file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let is_parquet = path.extension().is_some_and(|e| e == "parquet");
    if is_parquet {
        ParquetWriter::new(&mut file).finish(&mut df)?;
    } else {
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)?;
    }
    tracing::info!(rows = df.height(), path = %path.display(), "layer_table_written");
    Ok(())
}
