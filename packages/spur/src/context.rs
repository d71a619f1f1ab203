//! Instructional context injected for each classification.
//!
//! Every classification maps to one fixed block of text. Only the ultrawork
//! block takes a value: the command that validates work in the current
//! project.

use indoc::indoc;

use crate::{
    classify::{Classification, Hint, Mode},
    template,
};

/// The placeholder the ultrawork template interpolates.
pub const VALIDATION_KEY: &str = "validation";

const ULTRAWORK: &str = indoc! {"
    [ULTRAWORK MODE ENABLED]

    Work at maximum effort until the request is completely done:
    - Break the request into explicit todos before writing any code, and keep them current.
    - Delegate independent research or implementation to specialized agents in parallel when it helps.
    - Read the relevant code before changing it; never guess at an interface.
    - Do not stop at a partial solution, a stub, or a TODO left for the user.
    - Do not ask for confirmation on routine decisions; make them and note them.

    Before reporting completion, validate the work by running {{ $validation }}.
    Fix every failure it reports, then run it again until it passes.
"};

const SEARCH: &str = indoc! {"
    [SEARCH MODE ENABLED]

    Search exhaustively before answering:
    - Run several searches in parallel: by name, by string literal, and by usage site.
    - Check definitions, re-exports, and tests; the first hit is rarely the whole story.
    - Report every relevant location as `path:line`, not just the first one found.
    - If nothing matches, say which patterns were tried instead of guessing.
"};

const ANALYZE: &str = indoc! {"
    [ANALYSIS MODE ENABLED]

    Gather context before drawing conclusions:
    - Read the code paths involved end to end, including callers and tests.
    - Separate what the code does from what it is supposed to do.
    - Back every finding with a concrete reference (`path:line`, a command output, a log line).
    - Finish with a short summary: findings, likely causes, and recommended next steps.
"};

const THINK: &str = indoc! {"
    [EXTENDED REASONING ENABLED]

    Think the problem through before acting:
    - Restate the goal and the constraints in your own words.
    - Consider at least two approaches and the trade-offs between them.
    - Identify edge cases and failure modes up front.
    - Only then pick an approach and explain briefly why it wins.
"};

const DEBUG: &str = indoc! {"
    [DEBUG MODE ENABLED]

    Debug systematically:
    - Reproduce the failure first and capture the exact error output.
    - Form one hypothesis at a time and test it with the smallest possible change or probe.
    - Fix the root cause, not the symptom; do not suppress errors to make them disappear.
    - Confirm the fix by re-running the original reproduction, and add a regression test where practical.
"};

const LARGE_FILE: &str = indoc! {"
    [TIP: LARGE FILE]

    Large files are expensive to read whole. Search for the relevant symbols first,
    then read only the ranges you need with offsets and limits.
"};

const MULTI_FILE: &str = indoc! {"
    [TIP: MULTI-FILE CHANGE]

    List every affected file with a search before editing anything, track them as todos,
    and apply the change consistently. Re-run the search afterwards to confirm nothing was missed.
"};

const EXPLORATION: &str = indoc! {"
    [TIP: EXPLORATION]

    Start from the entry points and the project layout, then follow the call graph inward.
    Summarize the structure you find before diving into details.
"};

/// The raw template for a classification, before interpolation.
pub fn template_for(classification: Classification) -> &'static str {
    match classification {
        Classification::Mode(Mode::Ultrawork) => ULTRAWORK,
        Classification::Mode(Mode::Search) => SEARCH,
        Classification::Mode(Mode::Analyze) => ANALYZE,
        Classification::Mode(Mode::Think) => THINK,
        Classification::Mode(Mode::Debug) => DEBUG,
        Classification::Hint(Hint::LargeFile) => LARGE_FILE,
        Classification::Hint(Hint::MultiFile) => MULTI_FILE,
        Classification::Hint(Hint::Exploration) => EXPLORATION,
    }
}

/// Render the context for a classification.
///
/// `validation` is only used by the ultrawork template; it is ignored for
/// every other classification.
pub fn render(classification: Classification, validation: &str) -> String {
    let text = template_for(classification);
    match classification {
        Classification::Mode(Mode::Ultrawork) => {
            template::interpolate_one(text, VALIDATION_KEY, validation)
        }
        _ => text.to_string(),
    }
}
