/// Diagnostic tool to verify scan → items → layout pipeline
use std::path::PathBuf;

use tmview_rs::layout::{layout, Model, Rect};
use tmview_rs::render::{render_svg_with_labels, SvgConfig};
use tmview_rs::scanner::{self, ScanConfig};
use tmview_rs::tree;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tmview_rs=debug".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let scan_path = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    let svg_path = args.next().map(PathBuf::from);

    println!("=== DIAGNOSTIC: Scan → Items → Layout Pipeline ===");
    println!("Scanning: {}", scan_path.display());

    // Scan
    let entries = scanner::scan(&scan_path, &ScanConfig::default())?;
    println!("\n[1] Scan completed: {} entries", entries.len());

    // Build items
    let scanned = tree::build_items(&scan_path, &entries);
    println!("\n[2] Items built: {} items", scanned.items.len());

    // Show top 10 top-level items by weight (already sorted by the organizer)
    println!("\n[3] Top 10 top-level items:");
    for (i, item) in scanned
        .items
        .iter()
        .take_while(|item| item.is_root())
        .take(10)
        .enumerate()
    {
        println!(
            "    [{}] '{}' - {:.2} MB (children={})",
            i,
            scanned.name(item.id).unwrap_or("?"),
            item.weight / 1_048_576.0,
            item.children_count
        );
    }

    // Compute layout
    let area = Rect::from_size(1920.0, 1080.0);
    let mut model = Model::new(scanned.items.clone());
    layout(&mut model, area)?;
    println!("\n[4] Layout computed: {} rectangles", model.rects.len());

    // Show top 10 largest leaf rectangles
    println!("\n[5] Top 10 largest leaf rectangles by area:");
    let leaves: std::collections::HashSet<_> = model
        .items
        .iter()
        .filter(|item| item.is_leaf())
        .map(|item| item.id)
        .collect();
    let mut sorted_rects: Vec<Rect> = model
        .rects
        .iter()
        .filter(|r| leaves.contains(&r.id))
        .copied()
        .collect();
    sorted_rects.sort_by(|a, b| b.area().total_cmp(&a.area()));

    for (i, rect) in sorted_rects.iter().take(10).enumerate() {
        println!(
            "    [{}] '{}' - rect: {:.1}x{:.1} ({:.0}px²) at ({:.1}, {:.1})",
            i,
            scanned.name(rect.id).unwrap_or("?"),
            rect.width,
            rect.height,
            rect.area(),
            rect.x,
            rect.y,
        );
    }

    // Check for anomalies
    println!("\n[6] Checking for anomalies:");
    let leaf_area: f64 = sorted_rects.iter().map(Rect::area).sum();
    println!("    Total leaf area: {:.0}px²", leaf_area);
    println!("    Viewport area:   {:.0}px²", area.area());
    if model.stats.sum > 0.0 {
        println!("    Coverage: {:.1}%", (leaf_area / area.area()) * 100.0);
    }
    if model.rects.len() != model.items.len() {
        println!(
            "    ✗ {} items did not get a rect",
            model.items.len() - model.rects.len()
        );
    }
    let outside = model
        .rects
        .iter()
        .filter(|r| r.x < -1e-6 || r.y < -1e-6 || r.x + r.width > area.width + 1e-6 || r.y + r.height > area.height + 1e-6)
        .count();
    println!("    Rects outside the viewport: {}", outside);

    println!(
        "\n[7] Leaf stats: min={:.0} max={:.0} sum={:.0} count={}",
        model.stats.min, model.stats.max, model.stats.sum, model.stats.count
    );

    if let Some(svg_path) = svg_path {
        let svg = render_svg_with_labels(&model, &area, &SvgConfig::default(), |id| scanned.name(id));
        std::fs::write(&svg_path, svg)?;
        println!("\n[8] SVG written to {}", svg_path.display());
    }

    Ok(())
}
