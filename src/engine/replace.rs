use std::collections::BTreeMap;

use crate::{
    asset::model::{ImageAsset, MediaResource, PublicPathResolver},
    engine::generator::VariantGenerator,
    foundation::error::RenditorResult,
    store::asset_store::AssetStore,
    store::redirects::RedirectRecorder,
};

/// HTTP status used for permanent redirects after resource replacement.
const PERMANENT_REDIRECT_STATUS: u16 = 301;

#[derive(Clone, Copy, Debug, Default)]
/// Options controlling one resource replacement.
pub struct ReplaceOpts {
    /// Carry the previous resource's display filename over to the new one;
    /// the content changes but the name identity is preserved.
    pub keep_original_filename: bool,
    /// Record old→new public path pairs and register permanent redirects
    /// for them through the redirect recorder, when one is wired.
    pub generate_redirects: bool,
}

/// Mapping of old → new externally addressable paths produced by a
/// replacement, for the asset itself and each successfully regenerated
/// variant.
pub type PathRewriteMap = BTreeMap<String, String>;

/// Swaps an asset's underlying binary resource and re-synchronizes every
/// derived rendition against the new content.
///
/// Per-variant generation failures are isolated: one broken variant is logged
/// and skipped so it cannot block replacement of the asset or of its sibling
/// variants. This is deliberately looser than batch rendering, which treats
/// generation errors as fatal.
pub struct ResourceReplacer<'a> {
    generator: &'a VariantGenerator,
    paths: &'a dyn PublicPathResolver,
}

impl<'a> ResourceReplacer<'a> {
    /// Build a replacer over a generator and a public path resolver.
    pub fn new(generator: &'a VariantGenerator, paths: &'a dyn PublicPathResolver) -> Self {
        Self { generator, paths }
    }

    /// Install `new_resource` as the asset's resource, re-render every
    /// attached variant against it, register redirects for changed paths, and
    /// persist the asset.
    ///
    /// Returns the old→new path rewrites. A variant whose preset or variant
    /// spec has been removed from the catalog since it was created is left
    /// un-regenerated (logged, non-fatal).
    #[tracing::instrument(skip_all, fields(asset = %asset.id()))]
    pub fn replace_asset_resource<S: AssetStore>(
        &self,
        store: &mut S,
        asset: &mut ImageAsset,
        new_resource: MediaResource,
        opts: &ReplaceOpts,
        mut redirects: Option<&mut dyn RedirectRecorder>,
    ) -> RenditorResult<PathRewriteMap> {
        let mut new_resource = new_resource;
        if opts.keep_original_filename {
            new_resource.set_filename(asset.resource().filename().to_string());
        }
        let original = asset.set_resource(new_resource);

        let mut rewrites = PathRewriteMap::new();
        let record_paths = opts.generate_redirects && redirects.is_some();
        if record_paths {
            rewrites.insert(
                self.paths.public_path(&original),
                self.paths.public_path(asset.resource()),
            );
        }

        let attached: Vec<_> = asset
            .variants()
            .iter()
            .map(|v| (v.identity().clone(), self.paths.public_path(v.resource())))
            .collect();
        for (identity, old_path) in attached {
            match self
                .generator
                .recreate_variant(asset, &identity.preset, &identity.variant)
            {
                Ok(Some(variant)) => {
                    if record_paths {
                        rewrites.insert(old_path, self.paths.public_path(variant.resource()));
                    }
                }
                Ok(None) => {
                    tracing::debug!(
                        %identity,
                        "no variant returned when recreating; spec no longer configured"
                    );
                }
                Err(error) => {
                    tracing::error!(%identity, %error, "error when recreating asset variant");
                }
            }
        }

        if let Some(recorder) = redirects.as_deref_mut() {
            if opts.generate_redirects {
                for (old_path, new_path) in &rewrites {
                    if old_path != new_path && !recorder.has_redirect_for(old_path) {
                        recorder.add_redirect(old_path, new_path, PERMANENT_REDIRECT_STATUS);
                    }
                }
            }
        }

        store.update(asset)?;
        tracing::info!("replaced asset resource");
        Ok(rewrites)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/replace.rs"]
mod tests;
