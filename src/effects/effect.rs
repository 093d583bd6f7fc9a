use std::fmt;

use serde_json::Value;

use crate::effects::catalog::EffectKind;
use crate::foundation::error::FxshotResult;
use crate::render::surface::Surface;

/// A stateful visual transform applied to a rendered layer.
///
/// Implementations read `input` and write every pixel of `output`; both are premultiplied RGBA8
/// surfaces of the same size.
pub trait Effect: Send + Sync + fmt::Debug {
    /// Catalog entry this instance was built from.
    fn kind(&self) -> EffectKind;

    /// Assign a declared property by name.
    ///
    /// Unknown names and values of the wrong shape are errors; the builder decides whether they
    /// are fatal.
    fn set_param(&mut self, name: &str, value: &Value) -> FxshotResult<()>;

    /// Call a named tuning method. Returns `Ok(false)` when the effect has no such method.
    fn invoke(&mut self, method: &str, args: &[Value]) -> FxshotResult<bool> {
        let _ = (method, args);
        Ok(false)
    }

    /// Render the effect of `input` into `output`.
    fn apply(&self, input: &Surface, output: &mut Surface) -> FxshotResult<()>;
}
