use std::collections::BTreeMap;

use crate::{
    adjust::ops,
    catalog::preset::AdjustmentSpec,
    foundation::error::{RenditorError, RenditorResult},
};

/// A single configurable image transformation step.
///
/// Implementations are constructed by an [`AdjustmentRegistry`] from the
/// generic option mapping of an [`AdjustmentSpec`] and applied in declared
/// sequence: each adjustment receives the output of the previous one.
pub trait ImageAdjustment: std::fmt::Debug {
    /// Type tag this adjustment is registered under.
    fn kind(&self) -> &'static str;

    /// Apply the adjustment to a decoded image, producing the adjusted image.
    fn apply(&self, image: image::DynamicImage) -> RenditorResult<image::DynamicImage>;
}

/// Constructor resolving a generic option mapping into a ready adjustment.
///
/// Fails with [`RenditorError::InvalidAdjustmentType`] when the options do not
/// decode or validate for the adjustment kind.
pub type AdjustmentCtor = fn(&serde_json::Value) -> RenditorResult<Box<dyn ImageAdjustment>>;

#[derive(Clone)]
/// Registry mapping adjustment type tags to constructor functions.
///
/// Populated at startup; unknown tags fail closed with
/// [`RenditorError::UnknownAdjustmentType`].
pub struct AdjustmentRegistry {
    ctors: BTreeMap<String, AdjustmentCtor>,
}

impl std::fmt::Debug for AdjustmentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdjustmentRegistry")
            .field("kinds", &self.ctors.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl AdjustmentRegistry {
    /// Construct a registry with no adjustment kinds.
    pub fn empty() -> Self {
        Self {
            ctors: BTreeMap::new(),
        }
    }

    /// Construct a registry with the built-in adjustment kinds
    /// (`resize`, `crop`, `grayscale`).
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register("resize", ops::resize_ctor);
        registry.register("crop", ops::crop_ctor);
        registry.register("grayscale", ops::grayscale_ctor);
        registry
    }

    /// Register (or override) a constructor for a type tag.
    pub fn register(&mut self, kind: impl Into<String>, ctor: AdjustmentCtor) {
        self.ctors.insert(kind.into(), ctor);
    }

    /// Resolve one adjustment spec into a ready adjustment instance.
    pub fn resolve(&self, spec: &AdjustmentSpec) -> RenditorResult<Box<dyn ImageAdjustment>> {
        let ctor = self
            .ctors
            .get(spec.kind.as_str())
            .ok_or_else(|| RenditorError::unknown_adjustment(&spec.kind))?;
        ctor(&spec.options)
    }

    /// Resolve an ordered adjustment chain, preserving spec order.
    pub fn resolve_chain(
        &self,
        specs: &[AdjustmentSpec],
    ) -> RenditorResult<Vec<Box<dyn ImageAdjustment>>> {
        specs.iter().map(|spec| self.resolve(spec)).collect()
    }
}

impl Default for AdjustmentRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/adjust/registry.rs"]
mod tests;
