//! Keyword classification of user prompts.
//!
//! A prompt is lower-cased and tested against a fixed, ordered table of
//! pattern groups. The first group that matches decides the classification;
//! later groups are never consulted. Primary modes come first, then the
//! fallback hints, so a hint can only win when no mode matched.

use std::sync::LazyLock;

use derive_more::Display;
use itertools::Itertools;
use regex::Regex;

use crate::snippet::Span;

/// A primary mode, triggered by explicit keywords in the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Mode {
    /// Maximum-effort execution.
    #[display("ultrawork")]
    Ultrawork,

    /// Locating code or files.
    #[display("search")]
    Search,

    /// Deep analysis or investigation.
    #[display("analyze")]
    Analyze,

    /// Extended reasoning before acting.
    #[display("think")]
    Think,

    /// Debugging a failure.
    #[display("debug")]
    Debug,
}

/// A fallback hint, used only when no [`Mode`] matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Hint {
    /// The prompt mentions a large file.
    #[display("large-file")]
    LargeFile,

    /// The prompt describes an operation spanning many files.
    #[display("multi-file")]
    MultiFile,

    /// The prompt asks to explore or explain existing code.
    #[display("exploration")]
    Exploration,
}

/// The outcome of classifying a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Classification {
    /// A primary mode matched.
    #[display("{_0}")]
    Mode(Mode),

    /// No mode matched, but a fallback hint did.
    #[display("{_0}")]
    Hint(Hint),
}

impl Classification {
    /// Every classification, in evaluation order.
    pub const ALL: [Classification; 8] = [
        Classification::Mode(Mode::Ultrawork),
        Classification::Mode(Mode::Search),
        Classification::Mode(Mode::Analyze),
        Classification::Mode(Mode::Think),
        Classification::Mode(Mode::Debug),
        Classification::Hint(Hint::LargeFile),
        Classification::Hint(Hint::MultiFile),
        Classification::Hint(Hint::Exploration),
    ];

    /// The trigger patterns for this classification.
    ///
    /// Each entry is a regex fragment matched against the lower-cased prompt
    /// on word boundaries.
    pub fn triggers(self) -> &'static [&'static str] {
        match self {
            Classification::Mode(Mode::Ultrawork) => &[
                r"ultrawork",
                r"ulw",
                r"ultra[\s-]+work",
                r"max(?:imum)?[\s-]+effort",
                r"go\s+all\s+out",
                r"full[\s-]+throttle",
                r"no\s+shortcuts",
            ],
            Classification::Mode(Mode::Search) => &[
                r"search",
                r"find",
                r"locate",
                r"where\s+(?:is|are)",
                r"where's",
                r"look\s+(?:for|up)",
                r"grep",
                r"which\s+files?",
                r"hunt\s+down",
            ],
            Classification::Mode(Mode::Analyze) => &[
                r"analy[sz]e",
                r"analysis",
                r"investigate",
                r"investigation",
                r"examine",
                r"deep[\s-]+dive",
                r"audit",
                r"assess",
                r"root[\s-]+cause",
            ],
            Classification::Mode(Mode::Think) => &[
                r"ultrathink",
                r"think\s+(?:hard|harder|deeply|deeper|carefully)",
                r"think\s+it\s+through",
                r"think\s+step[\s-]+by[\s-]+step",
                r"reason\s+(?:through|carefully)",
            ],
            Classification::Mode(Mode::Debug) => &[
                r"debug(?:ging)?",
                r"stack[\s-]*trace",
                r"traceback",
                r"segfault",
                r"crash(?:es|ed|ing)?",
                r"exceptions?",
                r"panic(?:s|ked|king)?",
                r"not\s+working",
                r"doesn't\s+work",
                r"broken",
                r"failing\s+tests?",
                r"errors?",
                r"bugs?",
            ],
            Classification::Hint(Hint::LargeFile) => &[
                r"(?:large|huge|big|long|giant|massive)\s+files?",
                r"\d{4,}\s+lines",
                r"thousands\s+of\s+lines",
            ],
            Classification::Hint(Hint::MultiFile) => &[
                r"(?:all|every|multiple|several|many)\s+(?:the\s+|of\s+the\s+)?(?:files|modules|components|packages)",
                r"across\s+(?:the\s+)?(?:codebase|repo|repository|project|files)",
                r"codebase[\s-]+wide",
                r"bulk\s+(?:edit|rename|change)s?",
            ],
            Classification::Hint(Hint::Exploration) => &[
                r"explore",
                r"explain",
                r"understand",
                r"how\s+(?:does|do)",
                r"walk\s+me\s+through",
                r"overview\s+of",
                r"what\s+does",
                r"get\s+familiar",
            ],
        }
    }
}

/// A classification along with where in the prompt it was triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// The winning classification.
    pub classification: Classification,

    /// The byte range of the trigger phrase within [`Detection::normalized`].
    pub trigger: Span,

    /// The lower-cased prompt the patterns were evaluated against.
    pub normalized: String,
}

impl Detection {
    /// The text of the trigger phrase.
    pub fn trigger_text(&self) -> &str {
        &self.normalized[self.trigger.range()]
    }
}

/// A compiled pattern group.
struct PatternGroup {
    classification: Classification,
    pattern: Regex,
}

static GROUPS: LazyLock<Vec<PatternGroup>> = LazyLock::new(|| {
    Classification::ALL
        .into_iter()
        .map(|classification| {
            let alternatives = classification.triggers().iter().join("|");
            let pattern = Regex::new(&format!(r"\b(?:{alternatives})\b"))
                .expect("compile classification pattern");
            PatternGroup {
                classification,
                pattern,
            }
        })
        .collect()
});

/// Classify a prompt, returning the first matching pattern group.
///
/// Returns `None` for prompts that match nothing, including empty and
/// whitespace-only prompts.
#[tracing::instrument(skip_all)]
pub fn classify(prompt: &str) -> Option<Detection> {
    if prompt.trim().is_empty() {
        return None;
    }

    let normalized = prompt.to_lowercase();
    let detection = GROUPS.iter().find_map(|group| {
        group.pattern.find(&normalized).map(|m| Detection {
            classification: group.classification,
            trigger: Span::from(m.range()),
            normalized: normalized.clone(),
        })
    });

    tracing::debug!(?detection, "classify.result");
    detection
}
