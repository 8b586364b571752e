use std::sync::LazyLock;

use regex::Regex;
use whatlang::Lang;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Person,
    Location,
}

/// A detected entity, as byte offsets into the analyzed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    pub start: usize,
    pub end: usize,
    pub label: EntityLabel,
}

/// Seam for the statistical fallback of the redactor. Implementations return
/// one span per token to redact; the scrubber substitutes them back-to-front.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str, lang: Lang) -> Vec<EntitySpan>;
}

static CAP_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+\b").expect("capitalized-word regex"));

const LOCATION_PREPOSITIONS: &[&str] = &["in", "at", "from", "to", "near"];

/// Capitalized-run tagger used when no dedicated model is wired in.
///
/// A maximal run of capitalized Latin words is a location when the word just
/// before it is a location preposition, and a person when it is at least two
/// words long. A lone capitalized word without a preposition is ordinary
/// sentence case and is left alone.
#[derive(Debug, Default)]
pub struct HeuristicRecognizer;

impl EntityRecognizer for HeuristicRecognizer {
    fn recognize(&self, text: &str, _lang: Lang) -> Vec<EntitySpan> {
        let words: Vec<(usize, usize)> = CAP_WORD_RE
            .find_iter(text)
            .map(|m| (m.start(), m.end()))
            .collect();

        let mut spans = Vec::new();
        let mut i = 0;
        while i < words.len() {
            // Extend the run while words are separated by exactly one space.
            let mut j = i;
            while j + 1 < words.len() && &text[words[j].1..words[j + 1].0] == " " {
                j += 1;
            }

            let run = &words[i..=j];
            let label = if preceded_by_preposition(text, run[0].0) {
                Some(EntityLabel::Location)
            } else if run.len() >= 2 {
                Some(EntityLabel::Person)
            } else {
                None
            };

            if let Some(label) = label {
                for &(start, end) in run {
                    spans.push(EntitySpan { start, end, label });
                }
            }
            i = j + 1;
        }
        spans
    }
}

fn preceded_by_preposition(text: &str, start: usize) -> bool {
    let before = text[..start].trim_end();
    LOCATION_PREPOSITIONS
        .iter()
        .any(|p| before.ends_with(p) && !before[..before.len() - p.len()].ends_with(char::is_alphanumeric))
}
