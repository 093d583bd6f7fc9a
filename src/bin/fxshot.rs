use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use fxshot::{
    CpuRenderer, EffectKind, FrameStore, ImmediatePacer, InMemoryPresenter, Namespace,
    PngDirPresenter, PresentationSink, PreviewConfig, SceneAssets, Sequencer,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fxshot", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every descriptor of a config and capture images and frames.
    Run(RunArgs),
    /// List the effect catalog by namespace.
    List,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Preview config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Directory with the scene assets; synthetic assets are used when omitted.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Directory for captured images (`<id>.png`).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory for captured frames (`<name>.rgba` plus `manifest.json`).
    #[arg(long)]
    frames_out: Option<PathBuf>,

    /// Skip config validation and let unknown names fail when their cycle runs.
    #[arg(long, default_value_t = false)]
    no_validate: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::List => {
            cmd_list();
            Ok(())
        }
    }
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let config = PreviewConfig::from_path(&args.config)?;
    if !args.no_validate {
        config.validate()?;
    }

    let assets = match &args.assets {
        Some(dir) => SceneAssets::load_dir(dir)?,
        None => SceneAssets::synthetic(config.source_size)?,
    };

    let frames = match &args.out {
        Some(dir) => {
            let presenter = PngDirPresenter::new(dir, config.output.border)?;
            run_with(&config, &assets, presenter)?
        }
        None => run_with(&config, &assets, InMemoryPresenter::new())?,
    };

    if let Some(dir) = &args.frames_out {
        write_frames(dir, &frames)?;
    }
    Ok(())
}

fn run_with<P: PresentationSink>(
    config: &PreviewConfig,
    assets: &SceneAssets,
    presenter: P,
) -> anyhow::Result<FrameStore> {
    let mut seq = Sequencer::from_config(config, assets, CpuRenderer::new(), presenter)?;
    let summary = futures::executor::block_on(seq.run(&mut ImmediatePacer::new()))
        .with_context(|| format!("run stopped at descriptor {}", seq.cursor()))?;
    eprintln!(
        "{} cycles, {} images, {} frames",
        summary.cycles, summary.images, summary.frames
    );
    let (frames, _) = seq.finish();
    Ok(frames)
}

#[derive(Serialize)]
struct FrameManifest<'a> {
    width: u32,
    height: u32,
    format: &'static str,
    frames: Vec<ManifestEntry<'a>>,
}

#[derive(Serialize)]
struct ManifestEntry<'a> {
    name: &'a str,
    file: String,
    xxh3: String,
}

fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// File name for `name` that no earlier frame of this dump has taken.
fn unique_file(name: &str, taken: &mut HashSet<String>) -> String {
    let stem = file_stem(name);
    let mut file = format!("{stem}.rgba");
    let mut n = 1;
    while !taken.insert(file.clone()) {
        file = format!("{stem}-{n}.rgba");
        n += 1;
    }
    file
}

fn write_frames(dir: &Path, frames: &FrameStore) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create frames dir '{}'", dir.display()))?;

    let mut manifest = FrameManifest {
        width: 0,
        height: 0,
        format: "rgba8",
        frames: Vec::with_capacity(frames.len()),
    };
    let mut taken = HashSet::new();
    for (name, frame) in frames.iter() {
        manifest.width = frame.width;
        manifest.height = frame.height;
        let file = unique_file(name, &mut taken);
        let path = dir.join(&file);
        std::fs::write(&path, &frame.data)
            .with_context(|| format!("write frame '{}'", path.display()))?;
        let xxh3 = frames
            .fingerprint(name)
            .map(|h| format!("{h:016x}"))
            .unwrap_or_default();
        manifest.frames.push(ManifestEntry { name, file, xxh3 });
    }

    let path = dir.join("manifest.json");
    let json = serde_json::to_vec_pretty(&manifest).context("serialize frame manifest")?;
    std::fs::write(&path, json).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {} frames to {}", frames.len(), dir.display());
    Ok(())
}

fn cmd_list() {
    for ns in Namespace::ORDER {
        println!("[{ns}]");
        for kind in EffectKind::ALL.iter().filter(|k| k.namespace() == ns) {
            let params: Vec<String> = kind
                .params()
                .iter()
                .map(|p| format!("{}: {}", p.name, p.kind.describe()))
                .collect();
            println!("  {} ({})", kind.name(), params.join(", "));
            if !kind.methods().is_empty() {
                println!("    methods: {}", kind.methods().join(", "));
            }
        }
    }
}
