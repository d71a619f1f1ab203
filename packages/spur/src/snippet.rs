//! Snippet rendering for classified prompts.
//!
//! Uses `annotate-snippets` to render compiler-like output pointing at the
//! phrase in a prompt that triggered a classification.

use std::ops::Range;

use annotate_snippets::{Level, Renderer, Snippet};
use bon::Builder;
use derive_more::AsRef;

/// Text to be annotated.
#[derive(Debug, Clone, PartialEq, Eq, AsRef)]
pub struct Source(String);

impl Source {
    /// Annotate the text with the given annotations under a title.
    ///
    /// # Examples
    ///
    /// ```text
    /// note: Prompt classified as `search`.
    ///   |
    /// 1 | where is the login function defined
    ///   | ^^^^^^^^ matched trigger
    ///   |
    /// ```
    pub fn annotate(
        &self,
        title: &str,
        annotations: impl IntoIterator<Item = impl Into<Annotation>>,
    ) -> String {
        // `annotate_snippets` borrows the labels, so they have to be collected
        // before the snippet is built.
        let annotations = annotations.into_iter().map(Into::into).collect::<Vec<_>>();
        let annotations = annotations
            .iter()
            .map(|Annotation { span, label }| Level::Error.span(span.range()).label(label));

        let snippet = Snippet::source(self.0.as_ref()).annotations(annotations);
        let message = Level::Note.title(title).snippet(snippet);
        Renderer::plain().render(message).to_string()
    }
}

impl<S: Into<String>> From<S> for Source {
    fn from(source: S) -> Self {
        Self(source.into())
    }
}

/// An annotation on a source snippet.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct Annotation {
    /// The byte range of the annotation.
    #[builder(into)]
    pub span: Span,

    /// The label of the annotation.
    #[builder(into, default = Annotation::DEFAULT_LABEL)]
    pub label: String,
}

impl Annotation {
    /// The default label for an annotation if created without a label.
    pub const DEFAULT_LABEL: &str = "matched trigger";
}

impl<S: Into<Span>, L: Into<String>> From<(S, L)> for Annotation {
    fn from((span, label): (S, L)) -> Self {
        Self {
            span: span.into(),
            label: label.into(),
        }
    }
}

impl From<Span> for Annotation {
    fn from(span: Span) -> Self {
        Self {
            span,
            label: Self::DEFAULT_LABEL.into(),
        }
    }
}

/// A byte range in source content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct Span {
    /// Start byte offset.
    pub start: usize,

    /// End byte offset.
    pub end: usize,
}

impl Span {
    /// View the span as a `Range<usize>`.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}
