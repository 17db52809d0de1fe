use strum::{EnumCount, IntoEnumIterator};
use tracing::{instrument, Span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::domain::fortune::{FortuneSheet, CELL_COUNT};
use crate::domain::zodiac::{Category, Subject};
use crate::ports::fortune_generator::FortuneGenerator;

const PREVIEW_CHARS: usize = 30;

/// Outcome of generating every cell of a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSheet {
    pub sheet: FortuneSheet,
    pub generated: usize,
    pub fallbacks: usize,
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head = chars.by_ref().take(PREVIEW_CHARS).collect::<String>();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

fn setup_progress(span: &Span) {
    if let Ok(style) = indicatif::ProgressStyle::with_template(
        "{span_child_prefix}{spinner} {span_name} [{bar:30}] {pos}/{len}",
    ) {
        span.pb_set_style(&style);
    }
    span.pb_set_length(CELL_COUNT as u64);
}

/// Asks `generator` for every subject/category pair, one request at a time,
/// subjects outer and categories inner. A failed cell gets `fallback_text`,
/// so the returned sheet is always complete.
#[instrument(skip_all, name = "generate_all")]
pub async fn generate_all(generator: &dyn FortuneGenerator, fallback_text: &str) -> GeneratedSheet {
    let span = Span::current();
    setup_progress(&span);

    let mut sheet = FortuneSheet::new();
    let mut generated = 0;
    let mut fallbacks = 0;

    for subject in Subject::iter() {
        tracing::info!(
            "📝 Generating fortunes for {} ({}/{})",
            subject.label(),
            subject as usize + 1,
            Subject::COUNT
        );

        for category in Category::iter() {
            let text = match generator.generate(subject, category).await {
                Ok(text) => {
                    generated += 1;
                    tracing::info!("   ✓ {}: {}", category.label(), preview(&text));
                    text
                }
                Err(report) => {
                    fallbacks += 1;
                    tracing::warn!(
                        "   ✗ {} generation failed, using fallback: {:?}",
                        category.label(),
                        report
                    );
                    fallback_text.to_owned()
                }
            };
            sheet.insert(subject, category, text);
            span.pb_inc(1);
        }
    }

    GeneratedSheet {
        sheet,
        generated,
        fallbacks,
    }
}
