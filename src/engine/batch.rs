use crate::{
    asset::model::{AssetId, VariantIdentity},
    engine::generator::VariantGenerator,
    foundation::error::{RenditorError, RenditorResult},
    store::asset_store::AssetStore,
    store::index::ExistenceIndex,
};

#[derive(Clone, Copy, Debug)]
/// Options controlling one batch rendering run.
pub struct BatchOpts {
    /// Stop after this many generated variants. Bounds *generations*
    /// (successful creations/replacements), not work examined.
    pub limit: Option<u64>,
    /// Re-render variants that already exist instead of skipping them.
    pub recreate_existing: bool,
    /// Flush staged persistence changes after every Nth generation.
    pub checkpoint_every: u64,
}

impl Default for BatchOpts {
    fn default() -> Self {
        Self {
            limit: None,
            recreate_existing: false,
            checkpoint_every: 10,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Counters reported by a batch rendering run.
pub struct BatchSummary {
    /// Variants generated (created or replaced) during the run.
    pub generated: u64,
    /// Configured variant count × asset count; progress ceiling, not a
    /// correctness bound.
    pub expected_total: u64,
    /// Whether the run terminated because the generation limit was reached
    /// rather than by exhausting the population.
    pub stopped_by_limit: bool,
}

/// Walks the asset population and renders missing (or, under recreate mode,
/// all configured) variants.
///
/// The walk is deterministic per index snapshot: assets ascending by
/// identifier, presets in catalog order, variant specs in spec order. A fatal
/// generation error terminates the run, since a misconfigured catalog should
/// stop the batch rather than silently produce partial results; progress
/// checkpointed before the failure is retained.
pub struct BatchRenderer<'a, S: AssetStore> {
    store: &'a mut S,
    generator: &'a VariantGenerator,
}

impl<'a, S: AssetStore> BatchRenderer<'a, S> {
    /// Build an orchestrator over a store and a generator.
    pub fn new(store: &'a mut S, generator: &'a VariantGenerator) -> Self {
        Self { store, generator }
    }

    /// Render every configured variant that is missing from the population.
    #[tracing::instrument(skip(self))]
    pub fn render_missing(&mut self, opts: &BatchOpts) -> RenditorResult<BatchSummary> {
        if opts.limit == Some(0) {
            return Err(RenditorError::validation("limit must be at least 1"));
        }
        if opts.checkpoint_every == 0 {
            return Err(RenditorError::validation(
                "checkpoint_every must be at least 1",
            ));
        }

        let catalog = self.generator.catalog();
        let expected_total = catalog.configured_variant_count() * self.store.count_all();
        tracing::info!(expected_total, "checking configured variants for existence");

        // One snapshot per run; fresh writes below are ground truth and are
        // never re-queried from the index.
        let index = ExistenceIndex::build(self.store);

        let mut generated: u64 = 0;
        let mut stopped_by_limit = false;

        'walk: for asset_id in index.asset_ids() {
            if !opts.recreate_existing && self.asset_is_complete(&index, asset_id) {
                continue;
            }

            let mut asset = self.store.find_by_id(asset_id)?;
            for (preset_id, preset) in catalog.presets() {
                for variant_id in preset.variants.keys() {
                    let identity = VariantIdentity::new(preset_id, variant_id);
                    if !opts.recreate_existing && index.contains(asset_id, &identity) {
                        continue;
                    }

                    let produced = if opts.recreate_existing {
                        self.generator
                            .recreate_variant(&mut asset, preset_id, variant_id)?
                    } else {
                        self.generator
                            .create_one_variant(&mut asset, preset_id, variant_id)?
                    };
                    if produced.is_none() {
                        continue;
                    }

                    self.store.update(&asset)?;
                    generated += 1;
                    if generated % opts.checkpoint_every == 0 {
                        self.store.persist_checkpoint()?;
                    }
                    if Some(generated) == opts.limit {
                        stopped_by_limit = true;
                        break 'walk;
                    }
                }
            }
        }

        // Flush the tail not covered by the periodic cadence.
        if generated % opts.checkpoint_every != 0 {
            self.store.persist_checkpoint()?;
        }

        tracing::info!(generated, stopped_by_limit, "batch rendering finished");
        Ok(BatchSummary {
            generated,
            expected_total,
            stopped_by_limit,
        })
    }

    /// Whether every configured (preset, variant) pair already existed for the
    /// asset at snapshot time. Lets the walk skip the asset without fetching.
    fn asset_is_complete(&self, index: &ExistenceIndex, asset_id: &AssetId) -> bool {
        self.generator.catalog().presets().all(|(preset_id, preset)| {
            preset
                .variants
                .keys()
                .all(|variant_id| index.contains(asset_id, &VariantIdentity::new(preset_id, variant_id)))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/batch.rs"]
mod tests;
