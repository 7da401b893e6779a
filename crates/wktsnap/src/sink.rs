//! Visualization sink seam.
//!
//! The host display function (`iface.show_wkt` in the QGIS console) is
//! modelled as a single-method trait so callers can plug in a GUI bridge, a
//! script emitter, or a recorder.

use crate::error::SinkError;

pub trait LayerSink {
    /// Show one geometry as layer `layer`. Called once per loaded artifact.
    fn show_wkt(&mut self, wkt: &str, layer: &str) -> Result<(), SinkError>;
}

impl<S: LayerSink + ?Sized> LayerSink for &mut S {
    fn show_wkt(&mut self, wkt: &str, layer: &str) -> Result<(), SinkError> {
        (**self).show_wkt(wkt, layer)
    }
}

impl<S: LayerSink + ?Sized> LayerSink for Box<S> {
    fn show_wkt(&mut self, wkt: &str, layer: &str) -> Result<(), SinkError> {
        (**self).show_wkt(wkt, layer)
    }
}

/// One recorded `show_wkt` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerCall {
    pub wkt: String,
    pub layer: String,
}

/// Sink that keeps every call in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub calls: Vec<LayerCall>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers(&self) -> Vec<&str> {
        self.calls.iter().map(|c| c.layer.as_str()).collect()
    }
}

impl LayerSink for RecordingSink {
    fn show_wkt(&mut self, wkt: &str, layer: &str) -> Result<(), SinkError> {
        self.calls.push(LayerCall {
            wkt: wkt.to_string(),
            layer: layer.to_string(),
        });
        Ok(())
    }
}

/// Adapter for closures, e.g. bridges into a host API.
pub struct FnSink<F>(pub F);

impl<F> LayerSink for FnSink<F>
where
    F: FnMut(&str, &str) -> Result<(), SinkError>,
{
    fn show_wkt(&mut self, wkt: &str, layer: &str) -> Result<(), SinkError> {
        (self.0)(wkt, layer)
    }
}
