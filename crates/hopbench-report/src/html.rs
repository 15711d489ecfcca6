//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use hopbench_core::model::OptionLetter;
use hopbench_core::report::{QuestionTrace, SessionReport};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn correctness_label(correct: bool) -> &'static str {
    if correct {
        "CORRECT"
    } else {
        "INCORRECT"
    }
}

fn correctness_class(correct: bool) -> &'static str {
    if correct {
        "pass"
    } else {
        "fail"
    }
}

/// Generate an HTML report from a finished session.
pub fn generate_html(report: &SessionReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>hopbench report: {}</title>\n",
        html_escape(&report.participant.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>hopbench report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\"><strong>{}</strong> ({}) | difficulty {} | {} questions | {}</p>\n",
        html_escape(&report.participant.name),
        html_escape(&report.participant.position),
        report.difficulty,
        report.traces.len(),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Score panel
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str(&format!(
        "<h2>Comparison against {}</h2>\n",
        html_escape(&report.model_label)
    ));
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Participant</th><th>Model</th><th>Difference</th><th>Verdict</th></tr></thead>\n");
    html.push_str(&format!(
        "<tbody><tr><td>{}/{}</td><td>{}/{}</td><td>{:+.1}%</td><td>{}</td></tr></tbody>\n",
        report.scores.user,
        report.traces.len(),
        report.scores.model,
        report.traces.len(),
        report.percent_difference,
        report.scores.verdict(),
    ));
    html.push_str("</table>\n");
    html.push_str("</section>\n");

    // Per-question cards
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Questions</h2>\n");
    for (i, trace) in report.traces.iter().enumerate() {
        html.push_str(&question_card(i + 1, trace));
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

fn question_card(number: usize, trace: &QuestionTrace) -> String {
    let mut card = String::new();
    let user_letter = trace
        .user_answer
        .map(|l| l.to_string())
        .unwrap_or_else(|| "-".to_string());

    card.push_str(&format!(
        "<details class=\"card {}\" id=\"q{}\" open>\n",
        correctness_class(trace.user_correct),
        trace.question_id
    ));
    card.push_str(&format!(
        "<summary><span class=\"qnum\">Q{number}</span> You: <span class=\"{}\">{}</span> | Model: <span class=\"{}\">{}</span></summary>\n",
        correctness_class(trace.user_correct),
        html_escape(&user_letter),
        correctness_class(trace.model_correct),
        correctness_label(trace.model_correct),
    ));
    card.push_str(&format!(
        "<p class=\"question\">{}</p>\n",
        html_escape(&trace.question_text)
    ));

    card.push_str("<ol class=\"options\">\n");
    for (i, option) in trace.options.iter().enumerate() {
        let Some(letter) = OptionLetter::from_index(i) else {
            break;
        };
        let mut classes = Vec::new();
        if letter == trace.correct_answer {
            classes.push("correct");
        }
        if trace.user_answer == Some(letter) {
            classes.push("chosen");
        }
        card.push_str(&format!(
            "<li class=\"{}\"><strong>{letter}.</strong> {}</li>\n",
            classes.join(" "),
            html_escape(option)
        ));
    }
    card.push_str("</ol>\n");

    if !trace.model_explanation.is_empty() {
        card.push_str("<details>\n<summary>Model reasoning</summary>\n<pre><code>");
        card.push_str(&html_escape(&trace.model_explanation));
        card.push_str("</code></pre>\n</details>\n");
    }

    card.push_str("</details>\n");
    card
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &SessionReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.card { border: 1px solid var(--border); border-left-width: 6px; border-radius: 8px; padding: 0.5rem 1rem; margin: 1rem 0; }
.card > summary { font-weight: normal; }
.qnum { font-weight: bold; margin-right: 0.5rem; }
.card.pass { border-left-color: #22c55e; }
.card.fail { border-left-color: #ef4444; }
span.pass { color: #16a34a; font-weight: bold; }
span.fail { color: #dc2626; font-weight: bold; }
.options { list-style: none; padding-left: 0; }
.options li { padding: 0.25rem 0.5rem; border-radius: 4px; }
.options li.correct { background: var(--pass); }
.options li.chosen:not(.correct) { background: var(--fail); }
.options li.chosen { outline: 2px solid currentColor; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; white-space: pre-wrap; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;
