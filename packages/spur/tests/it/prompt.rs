//! UserPromptSubmit Hook Tests

use pretty_assertions::assert_eq as pretty_assert_eq;
use serde_json::json;
use simple_test_case::test_case;
use spur::{
    classify::{Classification, Hint, Mode},
    context,
    project::{self, ProjectKind},
};

use crate::{Expected, Project, assert_expected, prompt_hook};

#[test]
fn test_ultrawork_without_markers_uses_generic_validation() {
    let project = Project::new();
    let cwd = project.path().join("proj");
    let run = project.hook("prompt", &prompt_hook("ultrawork fix the bug", &cwd));

    assert_expected(&run, Expected::Context("UserPromptSubmit"));
    let context = run.additional_context();
    assert!(context.starts_with("[ULTRAWORK MODE ENABLED]"), "got: {context}");
    assert!(context.contains(project::GENERIC_VALIDATION), "got: {context}");
}

#[test_case("Cargo.toml", "`cargo build && cargo test`"; "rust")]
#[test_case("package.json", "`npm run build && npm test`"; "node")]
#[test_case("go.mod", "`go build ./... && go test ./...`"; "go")]
#[test]
fn test_ultrawork_uses_project_validation(marker: &str, validation: &str) {
    let project = Project::new();
    project.write(marker, "");
    let run = project.hook("prompt", &prompt_hook("ulw: ship it", project.path()));

    assert_expected(&run, Expected::Context("UserPromptSubmit"));
    pretty_assert_eq!(
        run.additional_context(),
        context::render(Classification::Mode(Mode::Ultrawork), validation)
    );
}

#[test]
fn test_search_checked_before_exploration() {
    let project = Project::new();
    let run = project.hook(
        "prompt",
        &prompt_hook("where is the login function defined", project.path()),
    );

    assert_expected(&run, Expected::Context("UserPromptSubmit"));
    pretty_assert_eq!(
        run.additional_context(),
        context::template_for(Classification::Mode(Mode::Search))
    );
}

#[test_case("analyze the flaky upload path", Classification::Mode(Mode::Analyze); "analyze")]
#[test_case("think hard about the schema", Classification::Mode(Mode::Think); "think")]
#[test_case("the build is broken", Classification::Mode(Mode::Debug); "debug")]
#[test_case("split this huge file up", Classification::Hint(Hint::LargeFile); "large file")]
#[test_case("rename it across the codebase", Classification::Hint(Hint::MultiFile); "multi file")]
#[test_case("explain the auth flow", Classification::Hint(Hint::Exploration); "exploration")]
#[test]
fn test_static_templates(prompt: &str, classification: Classification) {
    let project = Project::new();
    let run = project.hook("prompt", &prompt_hook(prompt, project.path()));

    assert_expected(&run, Expected::Context("UserPromptSubmit"));
    pretty_assert_eq!(run.additional_context(), context::template_for(classification));
}

#[test]
fn test_no_match_is_passthrough() {
    let project = Project::new();
    let run = project.hook("prompt", &prompt_hook("hello", &project.path().join("proj")));
    assert_expected(&run, Expected::Passthrough);
}

#[test]
fn test_empty_prompt_is_passthrough() {
    let project = Project::new();
    let input = json!({ "prompt": "", "cwd": "." }).to_string();
    let run = project.hook("prompt", &input);
    assert_expected(&run, Expected::Passthrough);
}

#[test]
fn test_missing_fields_use_defaults() {
    let project = Project::new();
    let run = project.hook("prompt", "{}");
    assert_expected(&run, Expected::Passthrough);
}

#[test_case("not json"; "plain text")]
#[test_case(""; "empty stdin")]
#[test_case("[1, 2, 3]"; "not an object")]
#[test]
fn test_malformed_input_fails(input: &str) {
    let project = Project::new();
    let run = project.hook("prompt", input);
    assert_ne!(run.exit_code, 0, "expected failure, stdout: {}", run.stdout);
    assert!(run.stdout.is_empty(), "expected no stdout, got: {}", run.stdout);
    assert!(run.stderr.contains("read hook event"), "stderr: {}", run.stderr);
}

#[test]
fn test_awkward_prompt_round_trips() {
    let project = Project::new();
    project.write("Makefile", "all:\n\ttrue\n");
    let prompt = "ultrawork: the \"quoted\" `code` path\nbreaks on line two \\ here";
    let run = project.hook("prompt", &prompt_hook(prompt, project.path()));

    assert_expected(&run, Expected::Context("UserPromptSubmit"));
    pretty_assert_eq!(run.stdout.lines().count(), 1);
    pretty_assert_eq!(
        run.additional_context(),
        context::render(
            Classification::Mode(Mode::Ultrawork),
            &ProjectKind::Make.validation_suggestion()
        )
    );
}

#[test]
fn test_output_is_idempotent() {
    let project = Project::new();
    project.write("pyproject.toml", "[project]\nname = \"demo\"\n");
    let input = prompt_hook("ultrawork refactor the parser", project.path());

    let first = project.hook("prompt", &input);
    let second = project.hook("prompt", &input);
    assert_expected(&first, Expected::Context("UserPromptSubmit"));
    pretty_assert_eq!(first.stdout, second.stdout);
}
