use eframe::egui::{RichText, ScrollArea, Ui};

use crate::aggregate::keywords::KeywordCloud;
use crate::color::generate_palette;

const MIN_FONT: f32 = 12.0;
const MAX_FONT: f32 = 56.0;

/// Font size for a keyword of relative frequency `weight` in `(0, 1]`.
fn font_size(weight: f64) -> f32 {
    MIN_FONT + (MAX_FONT - MIN_FONT) * (weight.clamp(0.0, 1.0).sqrt() as f32)
}

/// Render keywords as a wrapped cloud, larger for more frequent words.
pub fn keyword_cloud(ui: &mut Ui, cloud: &KeywordCloud) {
    let palette = generate_palette(8);
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.horizontal_wrapped(|ui: &mut Ui| {
                ui.spacing_mut().item_spacing.x = 10.0;
                for (i, kw) in cloud.words.iter().enumerate() {
                    let text = RichText::new(&kw.word)
                        .size(font_size(kw.weight))
                        .color(palette[i % palette.len()]);
                    ui.label(text)
                        .on_hover_text(format!("{}: {} occurrences", kw.word, kw.count));
                }
            });
        });
}
