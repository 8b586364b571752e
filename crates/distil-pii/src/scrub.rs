use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use whatlang::Lang;

use crate::ner::{EntityLabel, EntityRecognizer, HeuristicRecognizer};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+").expect("email regex")
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+?\d{1,3})?\(?\d{2,4}\)?[-.\s]?\d{2,4}[-.\s]?\d{2,9}").expect("phone regex")
});

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S*[a-zA-Z0-9/]").expect("url regex"));

// The regex crate has no lookaround, so the non-word boundary before the
// handle is a captured character that the replacement puts back.
static HANDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[^\w])@\w{5,32}\b").expect("handle regex"));

// Two consecutive capitalized Cyrillic words in a row.
static CYRILLIC_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([А-ЯЁ][а-яё]+)\s+([А-ЯЁ][а-яё]+)\b").expect("cyrillic name regex")
});

pub fn scrub_emails(text: &str) -> Cow<'_, str> {
    EMAIL_RE.replace_all(text, "[EMAIL]")
}

pub fn scrub_phones(text: &str) -> Cow<'_, str> {
    PHONE_RE.replace_all(text, "[PHONE]")
}

pub fn scrub_urls(text: &str) -> Cow<'_, str> {
    URL_RE.replace_all(text, "[URL]")
}

pub fn scrub_handles(text: &str) -> Cow<'_, str> {
    HANDLE_RE.replace_all(text, |c: &Captures| format!("{}[TG_USERNAME]", &c[1]))
}

/// Dominant language of a text. Fails closed to English on input that is too
/// short or too ambiguous for the detector.
pub fn detect_lang(text: &str) -> Lang {
    whatlang::detect_lang(text).unwrap_or(Lang::Eng)
}

/// Multi-stage PII redactor.
///
/// Stage 1 is the structured-pattern cascade (emails, phones, URLs, handles).
/// Stage 2 is the Cyrillic name shortcut, which resolves the text outright
/// when it fires — mixed-language text fools the detector, so the pattern is
/// checked before it. Stage 3 detects the dominant language and asks the
/// entity recognizer for person/location spans.
pub struct Scrubber {
    recognizer: Box<dyn EntityRecognizer>,
}

impl Default for Scrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl Scrubber {
    pub fn new() -> Self {
        Self::with_recognizer(Box::new(HeuristicRecognizer))
    }

    pub fn with_recognizer(recognizer: Box<dyn EntityRecognizer>) -> Self {
        Self { recognizer }
    }

    /// Redact PII from `text`, substituting categorical tags in place.
    /// Empty input is returned unchanged.
    pub fn scrub(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let text = scrub_emails(text);
        let text = scrub_phones(&text);
        let text = scrub_urls(&text);
        let text = scrub_handles(&text);

        if CYRILLIC_NAME_RE.is_match(&text) {
            return CYRILLIC_NAME_RE
                .replace_all(&text, "[PERSON] [PERSON]")
                .into_owned();
        }

        let lang = detect_lang(&text);
        let mut spans = self.recognizer.recognize(&text, lang);
        // Highest offset first, so substitutions never invalidate the
        // offsets of spans still pending.
        spans.sort_by(|a, b| b.start.cmp(&a.start));

        let mut out = text.into_owned();
        for span in spans {
            let tag = match span.label {
                EntityLabel::Person => "[PERSON]",
                EntityLabel::Location => "[LOCATION]",
            };
            out.replace_range(span.start..span.end, tag);
        }
        out
    }

    /// Absent text stays absent.
    pub fn scrub_opt(&self, text: Option<&str>) -> Option<String> {
        text.map(|t| self.scrub(t))
    }
}
