//! Message contracts between a scope caller and the worker.
//!
//! A request is a single JSON object:
//!
//! ```text
//! { "image": { "width", "height", "pixels": "<base64 RGBA>" | [r, g, b, a, ...] },
//!   "scopeType": "histogram" | "waveform" | "vectorscope",
//!   "options"?: { "waveform"?: "luma" | "parade", "vectorscope"?: "rec709" | "simple" } }
//! ```
//!
//! and is answered by exactly one of
//! `{ "scopeType", "result" }` or `{ "error", "stack"? }`.
//!
//! Only the envelope is strict. `options` stays raw JSON until the scope
//! type has been accepted, so an unknown `scopeType` is always the error
//! that gets reported.

use std::error::Error as _;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use scopekit_core::{
    ScopeEngine, ScopeError, ScopeImage, ScopeKind, ScopeOptions, ScopeOutput, ScopeResult,
    VectorscopePolicy, WaveformMode,
};

/// Interleaved RGBA8 payload in either accepted encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pixels {
    /// Base64, standard alphabet, padded.
    Base64(String),
    /// One JSON number per byte.
    Bytes(Vec<u8>),
}

/// Frame as carried on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Pixels,
}

impl WireImage {
    /// Encode a packed RGBA buffer for sending.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Self {
        Self {
            width,
            height,
            pixels: Pixels::Base64(STANDARD.encode(rgba)),
        }
    }

    /// Decode and validate into a frame the scopes can read.
    pub fn decode(&self) -> ScopeResult<ScopeImage> {
        let bytes = match &self.pixels {
            Pixels::Base64(text) => STANDARD
                .decode(text.as_bytes())
                .map_err(|e| ScopeError::malformed_with("pixel payload is not valid base64", e))?,
            Pixels::Bytes(bytes) => bytes.clone(),
        };
        ScopeImage::new(self.width, self.height, bytes)
    }
}

/// Per-request overrides of the worker's default scope variants.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RequestOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waveform: Option<WaveformMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vectorscope: Option<VectorscopePolicy>,
}

impl RequestOptions {
    /// Read overrides from a request's raw `options` object. Absent or
    /// `null` fields keep the defaults.
    pub fn from_json(value: &Value) -> ScopeResult<Self> {
        let fields = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(fields) => fields,
            other => {
                return Err(ScopeError::InvalidOption {
                    name: "options",
                    value: other.to_string(),
                });
            }
        };

        Ok(Self {
            waveform: parse_field(fields.get("waveform"), "waveform mode")?,
            vectorscope: parse_field(fields.get("vectorscope"), "vectorscope policy")?,
        })
    }

    /// Layer these overrides on top of `defaults`.
    pub fn resolve(self, defaults: ScopeOptions) -> ScopeOptions {
        ScopeOptions {
            waveform: self.waveform.unwrap_or(defaults.waveform),
            vectorscope: self.vectorscope.unwrap_or(defaults.vectorscope),
        }
    }
}

fn parse_field<T>(field: Option<&Value>, name: &'static str) -> ScopeResult<Option<T>>
where
    T: std::str::FromStr<Err = ScopeError>,
{
    match field {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => text.parse().map(Some),
        Some(other) => Err(ScopeError::InvalidOption {
            name,
            value: other.to_string(),
        }),
    }
}

/// Caller → worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeRequest {
    pub image: WireImage,
    /// Kept as a raw string so unknown kinds reach the boundary and get a
    /// proper error response instead of failing deserialization.
    pub scope_type: String,
    /// Raw overrides, read by `RequestOptions::from_json` once the scope
    /// type is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl ScopeRequest {
    pub fn new(image: WireImage, kind: ScopeKind) -> Self {
        Self {
            image,
            scope_type: kind.to_string(),
            options: None,
        }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = serde_json::to_value(options).ok();
        self
    }

    /// Run this request to completion. This is the error boundary: every
    /// failure comes back as `ScopeResponse::Error`.
    pub fn respond(self, defaults: ScopeOptions) -> ScopeResponse {
        match self.process(defaults) {
            Ok(result) => ScopeResponse::Result {
                scope_type: result.kind(),
                result,
            },
            Err(e) => {
                tracing::warn!(scope_type = %self.scope_type, "scope request failed: {e}");
                ScopeResponse::from_error(&e)
            }
        }
    }

    fn process(&self, defaults: ScopeOptions) -> ScopeResult<ScopeOutput> {
        let kind = self.scope_type.parse::<ScopeKind>()?;
        let overrides = match &self.options {
            Some(raw) => RequestOptions::from_json(raw)?,
            None => RequestOptions::default(),
        };
        let image = self.image.decode()?;
        let options = overrides.resolve(defaults);
        ScopeEngine::new(options).compute(&image, kind)
    }
}

/// Worker → caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeResponse {
    /// The finished scope.
    Result {
        #[serde(rename = "scopeType")]
        scope_type: ScopeKind,
        result: ScopeOutput,
    },
    /// The request failed; no partial result.
    Error {
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stack: Option<String>,
    },
}

impl ScopeResponse {
    /// Error response carrying `err`'s message and its `source()` chain.
    pub fn from_error(err: &ScopeError) -> Self {
        let mut chain = Vec::new();
        let mut cause = err.source();
        while let Some(e) = cause {
            chain.push(format!("caused by: {e}"));
            cause = e.source();
        }

        Self::Error {
            error: err.to_string(),
            stack: (!chain.is_empty()).then(|| chain.join("\n")),
        }
    }

    /// Error response for a line that never became a `ScopeRequest`.
    pub fn invalid_request(err: &serde_json::Error) -> Self {
        Self::Error {
            error: format!("invalid request: {err}"),
            stack: None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}
