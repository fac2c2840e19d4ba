use std::fmt::Write;

use comfy_table::Cell;

use crate::records::{CheckCollection, Collection, CommitCollection, WorkflowsCollection};

use super::styling::{bright, bright_yellow, cyan, dim};
use super::tables::{conclusion_cell, create_cyan_header, create_table, more_rows};

const MAX_ROWS: usize = 10;

/// Prints a human-readable summary of the collected metadata to stdout.
///
/// `source` names where the data came from: the repository, or the result
/// file when it was loaded from disk.
pub fn print_summary(collection: &Collection, source: &str) {
    println!("{}", render_summary(collection, source));
}

fn add_section_header(output: &mut String, emoji: &str, title: &str) {
    let _ = writeln!(output, "{} {}", bright(emoji), bright(title).underlined());
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}

fn render_summary(collection: &Collection, source: &str) -> String {
    let mut output = String::new();

    add_section_header(&mut output, "📊", "Overview");
    let _ = writeln!(
        output,
        "  {} {}\n  {} {}\n",
        dim("Source:"),
        cyan(source),
        dim("Records:"),
        bright_yellow(collection.record_count()),
    );

    match collection {
        Collection::Commits(commits) => render_commits(&mut output, commits),
        Collection::Checks(checks) => render_checks(&mut output, checks),
        Collection::Workflows(workflows) => render_workflows(&mut output, workflows),
    }

    output
}

fn render_commits(output: &mut String, collection: &CommitCollection) {
    add_section_header(output, "📝", &format!("Commits on {}", collection.branch));

    if collection.commits.is_empty() {
        let _ = writeln!(output, "{}", bright_yellow("No commits found."));
        return;
    }

    let mut table = create_table();
    table.set_header(create_cyan_header(&["SHA", "Author", "Date", "Message"]));
    for commit in collection.commits.iter().take(MAX_ROWS) {
        table.add_row(vec![
            Cell::new(short_sha(&commit.sha)),
            Cell::new(commit.author.as_deref().unwrap_or("unknown")),
            Cell::new(
                commit
                    .committed_at
                    .map_or_else(|| "N/A".to_string(), |at| at.format("%Y-%m-%d %H:%M").to_string()),
            ),
            Cell::new(&commit.message),
        ]);
    }
    if collection.commits.len() > MAX_ROWS {
        table.add_row(more_rows(collection.commits.len() - MAX_ROWS, 4));
    }
    let _ = writeln!(output, "{table}\n");

    if let Some(selected) = &collection.selected {
        add_section_header(
            output,
            "📂",
            &format!("Files changed in {}", short_sha(&selected.sha)),
        );
        let mut files = create_table();
        files.set_header(create_cyan_header(&["Blob", "File"]));
        for (blob, file) in selected.files.iter().take(MAX_ROWS) {
            files.add_row(vec![Cell::new(short_sha(blob)), Cell::new(&file.filename)]);
        }
        if selected.files.len() > MAX_ROWS {
            files.add_row(more_rows(selected.files.len() - MAX_ROWS, 2));
        }
        let _ = writeln!(output, "{files}");
    }
}

fn render_checks(output: &mut String, collection: &CheckCollection) {
    add_section_header(
        output,
        "✅",
        &format!("Checks for {}", short_sha(&collection.sha)),
    );

    if collection.check_suites.is_empty() {
        let _ = writeln!(output, "{}", bright_yellow("No check suites found."));
        return;
    }

    let mut table = create_table();
    table.set_header(create_cyan_header(&["Suite", "App", "Check Run", "Conclusion"]));
    for suite in &collection.check_suites {
        let app = suite.app.as_deref().unwrap_or("unknown");
        if suite.check_runs.is_empty() {
            table.add_row(vec![
                Cell::new(suite.id),
                Cell::new(app),
                Cell::new("-"),
                conclusion_cell(suite.conclusion.as_deref()),
            ]);
        }
        for run in &suite.check_runs {
            table.add_row(vec![
                Cell::new(suite.id),
                Cell::new(app),
                Cell::new(&run.name),
                conclusion_cell(run.conclusion.as_deref()),
            ]);
        }
    }
    let _ = writeln!(output, "{table}");
}

fn render_workflows(output: &mut String, collection: &WorkflowsCollection) {
    add_section_header(output, "⚙️", "Workflows");

    if collection.workflows.is_empty() {
        let _ = writeln!(output, "{}", bright_yellow("No workflows found."));
        return;
    }

    let mut table = create_table();
    table.set_header(create_cyan_header(&[
        "Workflow",
        "Runs",
        "Most Recent Run",
        "Events",
        "Branches",
    ]));
    for (workflow_id, runs) in &collection.workflows {
        let mut events: Vec<&str> = runs.iter().map(|(_, run)| run.event.as_str()).collect();
        events.sort_unstable();
        events.dedup();

        let mut branches: Vec<&str> = runs
            .iter()
            .filter_map(|(_, run)| run.head_branch.as_deref())
            .collect();
        branches.sort_unstable();
        branches.dedup();

        table.add_row(vec![
            Cell::new(workflow_id),
            Cell::new(runs.len()),
            Cell::new(
                runs.most_recent
                    .map_or_else(|| "N/A".to_string(), |id| id.to_string()),
            ),
            Cell::new(events.join(", ")),
            Cell::new(branches.join(", ")),
        ]);
    }
    let _ = writeln!(output, "{table}");
}
