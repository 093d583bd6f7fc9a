use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::foundation::core::{OutputGeometry, SourceSize};
use crate::foundation::error::{FxshotError, FxshotResult};

/// Which part of the scene an effect is attached to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The whole stage: background and subject.
    #[default]
    Full,
    /// Only the subject layer.
    Subject,
}

impl Scope {
    /// Map the descriptor's `scope` flag (`true` = subject only).
    pub fn from_flag(subject_only: bool) -> Self {
        if subject_only {
            Scope::Subject
        } else {
            Scope::Full
        }
    }
}

/// An optional tuning method call, applied after options.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Invocation {
    /// Method name.
    pub method: String,
    /// Positional call arguments.
    #[serde(default)]
    pub args: Vec<Value>,
}

/// One configuration entry: how to build, tune and capture one effect.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "DescriptorRepr")]
pub struct EffectDescriptor {
    /// Effect name, resolved in the `filters` namespace and then `core`.
    pub name: String,
    /// Positional constructor arguments; ignored for resource-backed effects.
    pub construction_args: Vec<Value>,
    /// Property overrides applied after construction.
    pub options: Map<String, Value>,
    /// Optional method call applied after `options`.
    pub invoke: Option<Invocation>,
    /// Attachment scope.
    pub scope: Scope,
    /// Identifier handed to the presentation sink.
    pub capture_as_image: Option<String>,
    /// Frame store key.
    pub capture_as_frame: Option<String>,
}

impl EffectDescriptor {
    /// A full-scene descriptor with no arguments, options or captures.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_option(mut self, name: impl Into<String>, value: Value) -> Self {
        self.options.insert(name.into(), value);
        self
    }

    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.construction_args = args;
        self
    }

    pub fn with_invoke(mut self, method: impl Into<String>, args: Vec<Value>) -> Self {
        self.invoke = Some(Invocation {
            method: method.into(),
            args,
        });
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn capture_image(mut self, id: impl Into<String>) -> Self {
        self.capture_as_image = Some(id.into());
        self
    }

    pub fn capture_frame(mut self, name: impl Into<String>) -> Self {
        self.capture_as_frame = Some(name.into());
        self
    }

    /// `true` when the cycle produces no artifact.
    pub fn is_silent(&self) -> bool {
        self.capture_as_image.is_none() && self.capture_as_frame.is_none()
    }
}

// Wire shape, including the legacy field names still found in older configs.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescriptorRepr {
    name: String,
    #[serde(default, alias = "arguments")]
    construction_args: Option<Value>,
    #[serde(default)]
    options: Option<Map<String, Value>>,
    #[serde(default)]
    invoke: Option<Invocation>,
    #[serde(default)]
    func: Option<String>,
    #[serde(default)]
    args: Option<Value>,
    #[serde(default, alias = "fishOnly")]
    scope: bool,
    #[serde(default, alias = "filename")]
    capture_as_image: Option<String>,
    #[serde(default, alias = "frame")]
    capture_as_frame: Option<String>,
}

fn into_list(v: Option<Value>) -> Vec<Value> {
    match v {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(single) => vec![single],
    }
}

impl From<DescriptorRepr> for EffectDescriptor {
    fn from(r: DescriptorRepr) -> Self {
        let invoke = r.invoke.or_else(|| {
            r.func.map(|method| Invocation {
                method,
                args: into_list(r.args),
            })
        });
        Self {
            name: r.name,
            construction_args: into_list(r.construction_args),
            options: r.options.unwrap_or_default(),
            invoke,
            scope: Scope::from_flag(r.scope),
            capture_as_image: r.capture_as_image,
            capture_as_frame: r.capture_as_frame,
        }
    }
}

/// Root configuration document.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewConfig {
    /// Descriptors, processed strictly in order.
    #[serde(default)]
    pub images: Vec<EffectDescriptor>,
    #[serde(default)]
    pub output: OutputGeometry,
    #[serde(default)]
    pub source_size: SourceSize,
}

impl PreviewConfig {
    /// Config with default geometry.
    pub fn new(images: Vec<EffectDescriptor>) -> Self {
        Self {
            images,
            ..Self::default()
        }
    }

    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FxshotResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FxshotError::serde(format!("parse preview config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FxshotResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FxshotError::validation(format!("open preview config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate names, option keys and shapes, invocations and output geometry.
    pub fn validate(&self) -> FxshotResult<()> {
        super::validate::validate_config(self)
            .map_err(|e| FxshotError::validation(format!("preview config is invalid:\n{e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
