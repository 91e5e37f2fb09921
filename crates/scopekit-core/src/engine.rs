//! Single entry point for scope requests.
//!
//! `ScopeEngine::compute` picks the reduction for a `ScopeKind`, runs it to
//! completion, and turns any internal panic into `ScopeError::ComputationFault`
//! so callers only ever see a full grid or an error.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ScopeError, ScopeResult};
use crate::image::ScopeImage;
use crate::scopes::{
    HistogramData, ParadeData, VectorscopeData, VectorscopePolicy, WaveformData, histogram,
    parade, vectorscope, waveform,
};

/// Which scope a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    Histogram,
    Waveform,
    Vectorscope,
}

impl ScopeKind {
    pub const ALL: [Self; 3] = [Self::Histogram, Self::Waveform, Self::Vectorscope];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Histogram => "histogram",
            Self::Waveform => "waveform",
            Self::Vectorscope => "vectorscope",
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScopeKind {
    type Err = ScopeError;

    /// Exact, case-sensitive match on the wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ScopeError::InvalidScopeType(s.to_string()))
    }
}

/// What a `waveform` request produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveformMode {
    /// Single Rec.709 luma grid.
    Luma,
    /// Three per-channel grids.
    #[default]
    Parade,
}

impl fmt::Display for WaveformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Luma => "luma",
            Self::Parade => "parade",
        })
    }
}

impl FromStr for WaveformMode {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "luma" => Ok(Self::Luma),
            "parade" | "rgb" => Ok(Self::Parade),
            _ => Err(ScopeError::InvalidOption {
                name: "waveform mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Variant selection for the scopes that have more than one form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeOptions {
    pub waveform: WaveformMode,
    pub vectorscope: VectorscopePolicy,
}

/// A finished scope grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ScopeOutput {
    Histogram(HistogramData),
    Waveform(WaveformData),
    Parade(ParadeData),
    Vectorscope(VectorscopeData),
}

impl ScopeOutput {
    /// The request kind this output answers.
    pub fn kind(&self) -> ScopeKind {
        match self {
            Self::Histogram(_) => ScopeKind::Histogram,
            Self::Waveform(_) | Self::Parade(_) => ScopeKind::Waveform,
            Self::Vectorscope(_) => ScopeKind::Vectorscope,
        }
    }
}

/// Stateless dispatcher over the scope reductions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeEngine {
    options: ScopeOptions,
}

impl ScopeEngine {
    pub fn new(options: ScopeOptions) -> Self {
        Self { options }
    }

    /// Run one scope over `image`.
    pub fn compute(&self, image: &ScopeImage, kind: ScopeKind) -> ScopeResult<ScopeOutput> {
        tracing::debug!(
            %kind,
            width = image.width(),
            height = image.height(),
            waveform = %self.options.waveform,
            vectorscope = %self.options.vectorscope,
            "computing scope"
        );

        guarded(kind, || self.reduce(image, kind))
    }

    /// Parse `scope_type` and run it. Unknown names fail with
    /// `InvalidScopeType` before any pixel is read.
    pub fn compute_named(&self, image: &ScopeImage, scope_type: &str) -> ScopeResult<ScopeOutput> {
        let kind = scope_type.parse::<ScopeKind>()?;
        self.compute(image, kind)
    }

    fn reduce(&self, image: &ScopeImage, kind: ScopeKind) -> ScopeOutput {
        match kind {
            ScopeKind::Histogram => ScopeOutput::Histogram(histogram::compute(image)),
            ScopeKind::Waveform => match self.options.waveform {
                WaveformMode::Luma => ScopeOutput::Waveform(waveform::compute(image)),
                WaveformMode::Parade => ScopeOutput::Parade(parade::compute(image)),
            },
            ScopeKind::Vectorscope => {
                ScopeOutput::Vectorscope(vectorscope::compute(image, self.options.vectorscope))
            }
        }
    }
}

/// Run `reduce` to completion, converting a panic into `ComputationFault`.
fn guarded<T>(kind: ScopeKind, reduce: impl FnOnce() -> T) -> ScopeResult<T> {
    panic::catch_unwind(AssertUnwindSafe(reduce)).map_err(|payload| {
        let message = panic_message(payload.as_ref());
        tracing::error!(%kind, "scope computation panicked: {message}");
        ScopeError::ComputationFault(message)
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
