use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use renditor::{
    AdjustmentRegistry, AssetId, AssetStore, BatchOpts, BatchRenderer, ContentHashPaths,
    ImageAsset, ImageVariant, MediaResource, MediaType, MemoryAssetStore, MemoryRedirectRecorder,
    PresetCatalog, Redirect, RedirectRecorder, ReplaceOpts, ResourceReplacer, VariantGenerator,
    VariantIdentity,
};

#[derive(Parser, Debug)]
#[command(name = "renditor", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render missing (or all) configured variants for a library.
    RenderVariants(RenderVariantsArgs),
    /// Replace the binary resource of one asset and re-render its variants.
    ReplaceResource(ReplaceResourceArgs),
}

#[derive(Parser, Debug)]
struct RenderVariantsArgs {
    /// Library manifest JSON.
    #[arg(long)]
    library: PathBuf,

    /// Preset catalog JSON.
    #[arg(long)]
    catalog: PathBuf,

    /// Stop after this many generated variants (avoids memory exhaustion on
    /// very large libraries).
    #[arg(long)]
    limit: Option<u64>,

    /// Re-render variants that already exist, too.
    #[arg(long, default_value_t = false)]
    recreate: bool,

    /// Only report errors.
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

#[derive(Parser, Debug)]
struct ReplaceResourceArgs {
    /// Library manifest JSON.
    #[arg(long)]
    library: PathBuf,

    /// Preset catalog JSON.
    #[arg(long)]
    catalog: PathBuf,

    /// Identifier of the asset whose resource is replaced.
    #[arg(long)]
    asset: String,

    /// File holding the new resource content.
    #[arg(long)]
    file: PathBuf,

    /// Keep the asset's current display filename.
    #[arg(long, default_value_t = false)]
    keep_filename: bool,

    /// Record permanent redirects from old to new public paths
    /// (written to redirects.json next to the manifest).
    #[arg(long, default_value_t = false)]
    redirects: bool,

    /// Only report errors.
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let quiet = match &cli.cmd {
        Command::RenderVariants(args) => args.quiet,
        Command::ReplaceResource(args) => args.quiet,
    };
    init_tracing(quiet);

    match cli.cmd {
        Command::RenderVariants(args) => cmd_render_variants(args),
        Command::ReplaceResource(args) => cmd_replace_resource(args),
    }
}

/// Engine events (notably isolated per-variant replacement failures) go to
/// stderr; `--quiet` raises the filter so only errors get through.
fn init_tracing(quiet: bool) {
    let max_level = if quiet {
        tracing::Level::ERROR
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// Library manifest: JSON bookkeeping for assets and their derived variants,
// with binary content stored in files relative to the manifest.

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
struct LibraryManifest {
    assets: Vec<ManifestAsset>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct ManifestAsset {
    id: String,
    media_type: String,
    file: String,
    #[serde(default)]
    variants: Vec<ManifestVariant>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct ManifestVariant {
    preset: String,
    variant: String,
    media_type: String,
    file: String,
}

fn cmd_render_variants(args: RenderVariantsArgs) -> anyhow::Result<()> {
    let catalog = PresetCatalog::from_path(&args.catalog)?;
    let root = manifest_root(&args.library);
    let manifest = read_manifest(&args.library)?;
    let mut store = load_library(&manifest, &root)?;

    let generator = VariantGenerator::new(catalog, AdjustmentRegistry::with_builtins());
    let opts = BatchOpts {
        limit: args.limit,
        recreate_existing: args.recreate,
        ..BatchOpts::default()
    };

    if !args.quiet {
        eprintln!(
            "Checking up to {} variants for existence…",
            generator.catalog().configured_variant_count() * store.count_all()
        );
    }

    let summary = BatchRenderer::new(&mut store, &generator).render_missing(&opts)?;

    write_library(&args.library, &root, &store)?;
    if !args.quiet {
        if summary.stopped_by_limit {
            eprintln!(
                "Generated {} variants, exiting after reaching limit",
                summary.generated
            );
        } else {
            eprintln!("Generated {} variants", summary.generated);
        }
    }
    Ok(())
}

fn cmd_replace_resource(args: ReplaceResourceArgs) -> anyhow::Result<()> {
    let catalog = PresetCatalog::from_path(&args.catalog)?;
    let root = manifest_root(&args.library);
    let manifest = read_manifest(&args.library)?;
    let mut store = load_library(&manifest, &root)?;

    let asset_id = AssetId::new(args.asset.clone());
    let mut asset = store.find_by_id(&asset_id)?;

    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("read new resource from '{}'", args.file.display()))?;
    let filename = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| "resource".to_string());
    let media_type = media_type_for(&args.file);
    let new_resource = MediaResource::new(filename, media_type, bytes);

    let generator = VariantGenerator::new(catalog, AdjustmentRegistry::with_builtins());
    let paths = ContentHashPaths;
    let replacer = ResourceReplacer::new(&generator, &paths);
    let opts = ReplaceOpts {
        keep_original_filename: args.keep_filename,
        generate_redirects: args.redirects,
    };

    let redirects_path = root.join("redirects.json");
    let mut recorder = if args.redirects {
        Some(read_redirects(&redirects_path)?)
    } else {
        None
    };

    let rewrites = replacer.replace_asset_resource(
        &mut store,
        &mut asset,
        new_resource,
        &opts,
        recorder.as_mut().map(|r| r as &mut dyn RedirectRecorder),
    )?;
    store.persist_checkpoint()?;

    write_library(&args.library, &root, &store)?;
    if let Some(recorder) = recorder {
        write_redirects(&redirects_path, recorder.redirects())?;
    }

    if !args.quiet {
        eprintln!("Replaced resource of asset {}", asset_id);
        for (old, new) in &rewrites {
            eprintln!("  {old} -> {new}");
        }
    }
    Ok(())
}

fn manifest_root(library: &Path) -> PathBuf {
    library
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn read_manifest(path: &Path) -> anyhow::Result<LibraryManifest> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read library manifest '{}'", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parse library manifest '{}'", path.display()))
}

fn load_library(manifest: &LibraryManifest, root: &Path) -> anyhow::Result<MemoryAssetStore> {
    let mut store = MemoryAssetStore::new();
    for entry in &manifest.assets {
        let source = root.join(&entry.file);
        let bytes = std::fs::read(&source)
            .with_context(|| format!("read asset content '{}'", source.display()))?;
        let filename = Path::new(&entry.file)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(entry.file.as_str());
        let resource =
            MediaResource::new(filename, MediaType::new(entry.media_type.clone()), bytes);
        let mut asset = ImageAsset::new(AssetId::new(entry.id.clone()), resource.media_type().clone(), resource);

        for v in &entry.variants {
            let variant_path = root.join(&v.file);
            let bytes = std::fs::read(&variant_path)
                .with_context(|| format!("read variant content '{}'", variant_path.display()))?;
            let filename = Path::new(&v.file)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(v.file.as_str());
            let resource =
                MediaResource::new(filename, MediaType::new(v.media_type.clone()), bytes);
            asset.add_variant(ImageVariant::new(
                asset.id().clone(),
                VariantIdentity::new(v.preset.clone(), v.variant.clone()),
                resource,
                vec![],
            ));
        }
        store.insert(asset);
    }
    Ok(store)
}

fn write_library(library: &Path, root: &Path, store: &MemoryAssetStore) -> anyhow::Result<()> {
    let manifest = read_manifest(library)?;
    let variants_dir = root.join("variants");

    let mut out = LibraryManifest::default();
    for entry in manifest.assets {
        let id = AssetId::new(entry.id.clone());
        let Some(asset) = store.get(&id) else {
            out.assets.push(entry);
            continue;
        };

        // Source content may have been swapped by replace-resource.
        let source_path = root.join(&entry.file);
        std::fs::write(&source_path, asset.resource().data())
            .with_context(|| format!("write asset content '{}'", source_path.display()))?;

        let mut variants = Vec::new();
        for variant in asset.variants() {
            let rel = format!("variants/{}", variant.resource().filename());
            let target = variants_dir.join(variant.resource().filename());
            std::fs::create_dir_all(&variants_dir)
                .with_context(|| format!("create variants dir '{}'", variants_dir.display()))?;
            std::fs::write(&target, variant.resource().data())
                .with_context(|| format!("write variant '{}'", target.display()))?;
            variants.push(ManifestVariant {
                preset: variant.identity().preset.clone(),
                variant: variant.identity().variant.clone(),
                media_type: variant.resource().media_type().to_string(),
                file: rel,
            });
        }
        out.assets.push(ManifestAsset {
            id: entry.id,
            media_type: asset.media_type().to_string(),
            file: entry.file,
            variants,
        });
    }

    let json = serde_json::to_string_pretty(&out).context("serialize library manifest")?;
    std::fs::write(library, json)
        .with_context(|| format!("write library manifest '{}'", library.display()))?;
    Ok(())
}

fn read_redirects(path: &Path) -> anyhow::Result<MemoryRedirectRecorder> {
    if !path.is_file() {
        return Ok(MemoryRedirectRecorder::new());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read redirects '{}'", path.display()))?;
    let redirects: Vec<Redirect> =
        serde_json::from_str(&json).with_context(|| format!("parse redirects '{}'", path.display()))?;
    Ok(MemoryRedirectRecorder::with_redirects(redirects))
}

fn write_redirects(path: &Path, redirects: &[Redirect]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(redirects).context("serialize redirects")?;
    std::fs::write(path, json).with_context(|| format!("write redirects '{}'", path.display()))?;
    Ok(())
}

fn media_type_for(path: &Path) -> MediaType {
    match image::ImageFormat::from_path(path) {
        Ok(format) => MediaType::new(format.to_mime_type()),
        Err(_) => MediaType::new("application/octet-stream"),
    }
}
