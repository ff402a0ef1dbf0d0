use std::collections::HashMap;

use crate::layout::{Model, Rect};
use crate::render::colors::ColorRamp;
use crate::tree::ItemId;

/// Configuration for SVG output.
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// `id` attribute of the `<svg>` element
    pub document_id: String,
    /// Fill gradient from lightest to heaviest leaf weight
    pub ramp: ColorRamp,
    /// Outline width (0 disables outlines)
    pub stroke_width: f64,
    /// How much darker than the fill the outline is
    pub stroke_darken: f32,
    /// Decimal places for coordinates
    pub precision: usize,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            document_id: "tmvsvg".to_string(),
            ramp: ColorRamp::default(),
            stroke_width: 0.5,
            stroke_darken: 0.15,
            precision: 6,
        }
    }
}

/// Render every rect of `model` as an SVG document sized to `area`.
pub fn render_svg(model: &Model, area: &Rect, config: &SvgConfig) -> String {
    render_svg_with_labels(model, area, config, |_| None)
}

/// Like [`render_svg`], adding a `<title>` to each rect whose id has a label.
pub fn render_svg_with_labels<'a, F>(
    model: &Model,
    area: &Rect,
    config: &SvgConfig,
    labels: F,
) -> String
where
    F: Fn(ItemId) -> Option<&'a str>,
{
    let p = config.precision;
    let weights: HashMap<ItemId, f64> = model.items.iter().map(|i| (i.id, i.weight)).collect();
    let (min, max) = (model.stats.min, model.stats.max);

    let mut out = String::with_capacity(128 + model.rects.len() * 160);
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"{}\" width=\"{:.p$}\" height=\"{:.p$}\" viewBox=\"{:.p$} {:.p$} {:.p$} {:.p$}\">\n",
        escape(&config.document_id),
        area.width,
        area.height,
        area.x,
        area.y,
        area.width,
        area.height,
    ));

    for rect in model.rects.iter() {
        let weight = weights.get(&rect.id).copied().unwrap_or(0.0);
        let fill = config.ramp.map_linear(weight, min, max);

        out.push_str(&format!(
            "  <rect id=\"r{}\" x=\"{:.p$}\" y=\"{:.p$}\" width=\"{:.p$}\" height=\"{:.p$}\" fill=\"{}\"",
            rect.id.0,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            fill.to_hex(),
        ));
        if config.stroke_width > 0.0 {
            out.push_str(&format!(
                " stroke=\"{}\" stroke-width=\"{}\"",
                fill.darken(config.stroke_darken).to_hex(),
                config.stroke_width
            ));
        }
        out.push_str(&format!(" data-weight=\"{:.3}\"", weight));

        match labels(rect.id) {
            Some(label) => {
                out.push_str(&format!("><title>{}</title></rect>\n", escape(label)));
            }
            None => out.push_str("/>\n"),
        }
    }

    out.push_str("</svg>\n");
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout;
    use crate::tree::Item;

    fn model() -> (Model, Rect) {
        let area = Rect::from_size(100.0, 100.0);
        let mut model = Model::new(vec![Item::root(1, 20.0), Item::root(2, 1.0)]);
        layout(&mut model, area).unwrap();
        (model, area)
    }

    #[test]
    fn one_element_per_rect() {
        let (model, area) = model();
        let svg = render_svg(&model, &area, &SvgConfig::default());
        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<rect ").count(), 2);
        assert!(svg.contains("id=\"tmvsvg\""));
    }

    #[test]
    fn heaviest_leaf_gets_end_color() {
        let (model, area) = model();
        let config = SvgConfig {
            stroke_width: 0.0,
            ..SvgConfig::default()
        };
        let svg = render_svg(&model, &area, &config);
        assert!(svg.contains("id=\"r1\"") && svg.contains("fill=\"#ff5500\""));
        assert!(svg.contains("fill=\"#90e0ef\""));
        assert!(!svg.contains("stroke="));
    }

    #[test]
    fn labels_are_escaped_titles() {
        let (model, area) = model();
        let svg = render_svg_with_labels(&model, &area, &SvgConfig::default(), |id| {
            (id == ItemId(2)).then_some("a<b>&c")
        });
        assert!(svg.contains("<title>a&lt;b&gt;&amp;c</title>"));
        assert_eq!(svg.matches("<title>").count(), 1);
    }
}
