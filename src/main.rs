//! qrgrid CLI: print the module grid geometry of a QR code image.

use std::path::PathBuf;

use clap::Parser;
use qrgrid::{
    reader::binarize::DEFAULT_THRESHOLD, sample_modules, Binarize, GeometryDetector,
    GeometryEstimate, Layout, ModuleKind, ModuleMatrix, PatternMap,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "qrgrid")]
#[command(about = "Detect module count and quiet zone of an axis aligned QR code image")]
#[command(version)]
struct Cli {
    /// Path to the input image.
    image: PathBuf,

    /// Pixels with luminance below this value are dark.
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: u8,

    /// Module count per side, skips detection (requires --quiet and a square image).
    #[arg(long, requires = "quiet")]
    modules: Option<usize>,

    /// Quiet zone in modules per side, used with --modules.
    #[arg(long, requires = "modules")]
    quiet: Option<u32>,

    /// Print a map of module kinds and sampled colors.
    #[arg(long)]
    map: bool,
}

fn main() -> CliResult<()> {
    env_logger::init();
    let cli = Cli::parse();

    let img = image::open(&cli.image)?;
    let bin = img.binarize(cli.threshold);

    let est = match (cli.modules, cli.quiet) {
        (Some(n), Some(qz)) => GeometryEstimate::from_dimensions(bin.w, bin.h, n, qz)?,
        _ => GeometryDetector::new().threshold(cli.threshold).detect_binary(&bin)?,
    };

    print_estimate(&est, bin.w, bin.h);

    if cli.map {
        let modules = sample_modules(&bin, &est);
        let kinds = PatternMap::new(est.module_count);
        let total = est.module_count * est.module_count;
        println!("Dark modules: {}/{total}", modules.count_dark());
        println!("\n{}", module_map(&modules, &kinds));
    }

    Ok(())
}

fn print_estimate(est: &GeometryEstimate, w: u32, h: u32) {
    let qz_modules = est.quiet_zone_modules();
    let layout = Layout::new(w, h, est.module_count, qz_modules as usize);
    let (pitch_x, pitch_y) = layout.module_px();

    match est.version() {
        Some(ver) => println!("Version:      {ver}"),
        None => println!("Version:      unknown"),
    }
    println!("Modules:      {0}x{0}", est.module_count);
    println!("Quiet zone:   {}px ({qz_modules} modules)", est.quiet_zone);
    println!("Module size:  {:.3}px (canvas pitch {pitch_x:.3}x{pitch_y:.3})", est.module_size);
    println!("Finders:      {}/3", est.finder_score);
    let b = &est.bounds;
    println!("Content box:  ({}, {}) to ({}, {})", b.min_x, b.min_y, b.max_x, b.max_y);
}

// Finder modules as F/f, alignment as A/a, data as #/. (upper case or # for dark)
fn module_map(modules: &ModuleMatrix, kinds: &PatternMap) -> String {
    let w = modules.width();
    let mut res = String::with_capacity(w * (w + 1));
    for (y, row) in modules.rows().enumerate() {
        for (x, color) in row.iter().enumerate() {
            let kind = kinds.get(x, y).unwrap_or(ModuleKind::Data);
            res.push(match kind {
                ModuleKind::Finder => color.select('F', 'f'),
                ModuleKind::Alignment => color.select('A', 'a'),
                ModuleKind::Data => color.select('#', '.'),
            });
        }
        res.push('\n');
    }
    res
}
