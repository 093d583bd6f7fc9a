use std::collections::HashSet;
use std::fmt;

use crate::config::model::{EffectDescriptor, PreviewConfig};
use crate::effects::builder::{ArgBinding, bind_args};
use crate::effects::catalog::{EffectKind, resolve, valid_names};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SchemaPathElem {
    Field(&'static str),
    Index(usize),
    Key(String),
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaError {
    pub(crate) path: Vec<SchemaPathElem>,
    pub(crate) message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
            SchemaPathElem::Key(key) => {
                s.push('.');
                s.push_str(key);
            }
        }
    }
    s
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaErrors {
    pub(crate) errors: Vec<SchemaError>,
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

pub(crate) fn validate_config(config: &PreviewConfig) -> Result<(), SchemaErrors> {
    let mut errors = Vec::new();

    if let Err(e) = config.output.validate() {
        errors.push(SchemaError::at(
            &[SchemaPathElem::Field("output")],
            e.to_string(),
        ));
    }
    if config.source_size.width == 0 || config.source_size.height == 0 {
        errors.push(SchemaError::at(
            &[SchemaPathElem::Field("sourceSize")],
            "source width and height must be > 0",
        ));
    }

    let mut frames = HashSet::<&str>::new();
    for (i, desc) in config.images.iter().enumerate() {
        let path = [SchemaPathElem::Field("images"), SchemaPathElem::Index(i)];
        validate_descriptor(desc, &path, &mut errors);

        if let Some(frame) = desc.capture_as_frame.as_deref() {
            if !frames.insert(frame) {
                tracing::warn!(index = i, frame, "frame name reused; the later capture overwrites");
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaErrors { errors })
    }
}

fn validate_descriptor(
    desc: &EffectDescriptor,
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) {
    let at = |extra: &[SchemaPathElem]| -> Vec<SchemaPathElem> {
        let mut p = path.to_vec();
        p.extend_from_slice(extra);
        p
    };

    for (field, id) in [
        ("captureAsImage", &desc.capture_as_image),
        ("captureAsFrame", &desc.capture_as_frame),
    ] {
        if id.as_deref().is_some_and(|s| s.trim().is_empty()) {
            errors.push(SchemaError::at(
                &at(&[SchemaPathElem::Field(field)]),
                "capture identifier must be non-empty",
            ));
        }
    }

    let kind = match resolve(&desc.name) {
        Ok(kind) => kind,
        Err(e) => {
            errors.push(SchemaError::at(
                &at(&[SchemaPathElem::Field("name")]),
                format!("{e}; valid names: {}", valid_names().join(", ")),
            ));
            return;
        }
    };

    if !kind.uses_scene_resources() {
        for binding in bind_args(kind, &desc.construction_args) {
            match binding {
                ArgBinding::Param { index, name, value } => {
                    let p = at(&[
                        SchemaPathElem::Field("constructionArgs"),
                        SchemaPathElem::Index(index),
                    ]);
                    check_param(kind, name, value, &p, errors);
                }
                ArgBinding::Extra { index } => errors.push(SchemaError::at(
                    &at(&[
                        SchemaPathElem::Field("constructionArgs"),
                        SchemaPathElem::Index(index),
                    ]),
                    format!(
                        "{kind} takes at most {} constructor arguments",
                        kind.ctor_params().len()
                    ),
                )),
            }
        }
    }

    for (key, value) in &desc.options {
        let p = at(&[
            SchemaPathElem::Field("options"),
            SchemaPathElem::Key(key.clone()),
        ]);
        check_param(kind, key, value, &p, errors);
    }

    if let Some(inv) = &desc.invoke {
        if inv.method.trim().is_empty() {
            errors.push(SchemaError::at(
                &at(&[SchemaPathElem::Field("invoke"), SchemaPathElem::Field("method")]),
                "method name must be non-empty",
            ));
        }
    }
}

fn check_param(
    kind: EffectKind,
    name: &str,
    value: &serde_json::Value,
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) {
    let Some(spec) = kind.param(name) else {
        let known: Vec<&str> = kind.params().iter().map(|p| p.name).collect();
        let known = if known.is_empty() {
            "none".to_owned()
        } else {
            known.join(", ")
        };
        errors.push(SchemaError::at(
            path,
            format!("{kind} has no property '{name}' (settable: {known})"),
        ));
        return;
    };
    if let Err(e) = spec.check(value) {
        errors.push(SchemaError::at(path, e.to_string()));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/validate.rs"]
mod tests;
