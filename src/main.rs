use std::path::Path;

use anyhow::{bail, Context, Result};

use tmview_rs::codec;
use tmview_rs::layout::{layout, Model, Rect};
use tmview_rs::render::{self, report, SvgConfig};
use tmview_rs::scanner::{self, ScanConfig};
use tmview_rs::tree;

const USAGE: &str = "\
usage:
  tmview scan <dir> <out.tmv> [width height]   scan a directory, lay it out, encode
  tmview svg  <in.tmv> <out.svg>               render an encoded model as SVG
  tmview info <in.tmv> [--items] [--rects]     print an encoded model";

const DEFAULT_WIDTH: f64 = 1920.0;
const DEFAULT_HEIGHT: f64 = 1080.0;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tmview_rs=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!("missing command\n{USAGE}");
    };

    match (command.as_str(), &args[1..]) {
        ("scan", [dir, out, rest @ ..]) => {
            let (width, height) = parse_size(rest)?;
            cmd_scan(Path::new(dir), Path::new(out), width, height)
        }
        ("svg", [input, out]) => cmd_svg(Path::new(input), Path::new(out)),
        ("info", [input, flags @ ..]) => {
            let items = flags.iter().any(|f| f == "--items");
            let rects = flags.iter().any(|f| f == "--rects");
            cmd_info(Path::new(input), items, rects)
        }
        _ => bail!("invalid arguments\n{USAGE}"),
    }
}

fn parse_size(rest: &[String]) -> Result<(f64, f64)> {
    match rest {
        [] => Ok((DEFAULT_WIDTH, DEFAULT_HEIGHT)),
        [w, h] => {
            let width: f64 = w.parse().with_context(|| format!("bad width {w:?}"))?;
            let height: f64 = h.parse().with_context(|| format!("bad height {h:?}"))?;
            Ok((width, height))
        }
        _ => bail!("expected both width and height\n{USAGE}"),
    }
}

fn cmd_scan(dir: &Path, out: &Path, width: f64, height: f64) -> Result<()> {
    let entries = scanner::scan(dir, &ScanConfig::default())?;
    let scanned = tree::build_items(dir, &entries);

    let area = Rect::from_size(width, height);
    let mut model = Model::new(scanned.items);
    layout(&mut model, area).context("layout failed")?;
    tracing::info!(
        "Laid out {} rects, {} leaves totalling {:.0} bytes",
        model.rects.len(),
        model.stats.count,
        model.stats.sum
    );

    let bytes = codec::encode_to_vec(&model, &area).context("encoding failed")?;
    std::fs::write(out, &bytes).with_context(|| format!("cannot write {}", out.display()))?;
    tracing::info!("Wrote {} bytes to {}", bytes.len(), out.display());
    Ok(())
}

fn read_model(input: &Path) -> Result<(Model, Rect)> {
    let bytes =
        std::fs::read(input).with_context(|| format!("cannot read {}", input.display()))?;
    let mut model = Model::default();
    let area = codec::decode_into(&mut model, &bytes)
        .with_context(|| format!("{} is not a valid model file", input.display()))?;
    Ok((model, area))
}

fn cmd_svg(input: &Path, out: &Path) -> Result<()> {
    let (model, area) = read_model(input)?;
    let svg = render::render_svg(&model, &area, &SvgConfig::default());
    std::fs::write(out, svg).with_context(|| format!("cannot write {}", out.display()))?;
    tracing::info!("Rendered {} rects to {}", model.rects.len(), out.display());
    Ok(())
}

fn cmd_info(input: &Path, items: bool, rects: bool) -> Result<()> {
    let (model, area) = read_model(input)?;
    print!("{}", report::model_summary(&model, &area));
    if items {
        println!();
        print!("{}", report::item_table(&model));
    }
    if rects {
        println!();
        print!("{}", report::rect_table(&model));
    }
    Ok(())
}
