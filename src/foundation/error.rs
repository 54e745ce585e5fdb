/// Convenience result type used across Renditor.
pub type RenditorResult<T> = Result<T, RenditorError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Note that an unsupported asset kind or a preset that does not apply to an
/// asset's media type are *not* errors: generation operations return
/// `Ok(None)` for those so callers can skip silently.
#[derive(thiserror::Error, Debug)]
pub enum RenditorError {
    /// Invalid user-provided configuration or model data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An adjustment type tag could not be resolved against the registry.
    #[error("unknown image adjustment type '{0}'")]
    UnknownAdjustmentType(String),

    /// An adjustment type tag resolved, but its options did not decode or
    /// validate as that adjustment kind.
    #[error("invalid image adjustment '{kind}': {reason}")]
    InvalidAdjustmentType {
        /// Adjustment type tag as written in the variant spec.
        kind: String,
        /// Decode or validation failure detail.
        reason: String,
    },

    /// Applying a resolved adjustment chain to a source asset failed.
    #[error("error when applying adjustments to asset variant: {0}")]
    AdjustmentApplicationFailed(String),

    /// A freshly built variant refers to a different asset than the one it
    /// was about to be attached to. Indicates a construction bug upstream.
    #[error("variant refers to asset '{found}' but was attached to asset '{expected}'")]
    VariantAssetIdentityMismatch {
        /// Identifier of the asset the variant was attached to.
        expected: String,
        /// Identifier the variant's owning-asset reference actually holds.
        found: String,
    },

    /// Errors raised by an asset store collaborator.
    #[error("store error: {0}")]
    Store(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RenditorError {
    /// Build a [`RenditorError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RenditorError::UnknownAdjustmentType`] value.
    pub fn unknown_adjustment(kind: impl Into<String>) -> Self {
        Self::UnknownAdjustmentType(kind.into())
    }

    /// Build a [`RenditorError::InvalidAdjustmentType`] value.
    pub fn invalid_adjustment(kind: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::InvalidAdjustmentType {
            kind: kind.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`RenditorError::AdjustmentApplicationFailed`] value.
    pub fn adjustment_application(cause: impl std::fmt::Display) -> Self {
        Self::AdjustmentApplicationFailed(cause.to_string())
    }

    /// Build a [`RenditorError::Store`] value.
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
