use std::io::{self, Write};

use chemsep_db::io::util::truncate;
use chemsep_db::io::{BlockError, ParsedComponents, ParsedInteractions};
use chemsep_db::{BinaryInteractionRecord, NameIndex, PipelineConfig, Stage};

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

const MAX_FAILURE_ROWS: usize = 10;

pub fn print_component_summary(parsed: &ParsedComponents) {
    let with_casn = parsed.records.iter().filter(|r| r.has_casn()).count();
    let rows = vec![
        ("Blocks".to_string(), parsed.block_count().to_string()),
        ("Records".to_string(), parsed.records.len().to_string()),
        ("With CASN".to_string(), with_casn.to_string()),
        ("Malformed blocks".to_string(), parsed.failures.len().to_string()),
        (
            "Orphan A-E lines".to_string(),
            parsed.orphan_coefficients.to_string(),
        ),
    ];

    print_kv_table(&mut io::stderr().lock(), "Component Database", &rows);
}

pub fn print_name_summary(names: &NameIndex) {
    let rows = vec![
        ("Entries".to_string(), names.len().to_string()),
        ("Without CASN".to_string(), names.without_casn().to_string()),
        ("Omitted".to_string(), names.omitted.to_string()),
    ];

    print_kv_table(&mut io::stderr().lock(), "Name Index", &rows);
}

pub fn print_interaction_summary(parsed: &ParsedInteractions) {
    let resolved = parsed
        .records
        .iter()
        .filter(|r| r.is_fully_resolved())
        .count();
    let rows = vec![
        ("Pairs".to_string(), parsed.records.len().to_string()),
        ("Fully named".to_string(), resolved.to_string()),
        ("Unknown CASNs".to_string(), parsed.unresolved.to_string()),
        ("Skipped lines".to_string(), parsed.skipped_lines.to_string()),
    ];

    print_kv_table(&mut io::stderr().lock(), "Interaction Parameters", &rows);
}

pub fn print_outputs(config: &PipelineConfig, stages: &[Stage]) {
    let rows: Vec<_> = stages
        .iter()
        .map(|stage| {
            (
                stage.to_string(),
                stage.output_path(config).display().to_string(),
            )
        })
        .collect();

    print_kv_table(&mut io::stderr().lock(), "Written Files", &rows);
}

pub fn print_interaction_record(record: &BinaryInteractionRecord) {
    let name = |n: &Option<String>| n.clone().unwrap_or_else(|| "-".to_string());
    let rows = vec![
        ("CASN 1".to_string(), record.casn_1.clone()),
        ("Name 1".to_string(), name(&record.name_1)),
        ("CASN 2".to_string(), record.casn_2.clone()),
        ("Name 2".to_string(), name(&record.name_2)),
        ("k12".to_string(), record.k12.clone()),
        ("Comments".to_string(), record.comments.clone()),
    ];

    print_kv_table(&mut io::stderr().lock(), "Interaction Pair", &rows);
}

pub fn print_block_failures(failures: &[BlockError]) {
    if failures.is_empty() {
        return;
    }

    let mut out = io::stderr().lock();
    let block_w = 6usize;
    let line_w = 6usize;
    let sep_overhead = 10;
    let problem_w = SAFE_TABLE_WIDTH.saturating_sub(block_w + line_w + sep_overhead);
    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{INDENT}{left}{}{mid}{}{mid}{}{right}",
            "─".repeat(block_w + 2),
            "─".repeat(line_w + 2),
            "─".repeat(problem_w + 2)
        )
    };

    let _ = writeln!(out, "{INDENT}┌─ Skipped Component Blocks ─┐");
    let _ = writeln!(out, "{}", rule("┌", "┬", "┐"));
    let _ = writeln!(
        out,
        "{INDENT}│ {:>block_w$} │ {:>line_w$} │ {:<problem_w$} │",
        "Block", "Line", "Problem"
    );
    let _ = writeln!(out, "{}", rule("├", "┼", "┤"));

    for failure in failures.iter().take(MAX_FAILURE_ROWS) {
        let _ = writeln!(
            out,
            "{INDENT}│ {:>block_w$} │ {:>line_w$} │ {:<problem_w$} │",
            failure.block,
            failure.line,
            truncate(&failure.fault.to_string(), problem_w)
        );
    }

    if failures.len() > MAX_FAILURE_ROWS {
        let more = format!("… {} more", failures.len() - MAX_FAILURE_ROWS);
        let _ = writeln!(
            out,
            "{INDENT}│ {:>block_w$} │ {:>line_w$} │ {:<problem_w$} │",
            "", "", more
        );
    }

    let _ = writeln!(out, "{}", rule("└", "┴", "┘"));
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(String, String)]) {
    let key_w = 18usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);
    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{INDENT}{left}{}{mid}{}{right}",
            "─".repeat(key_w + 2),
            "─".repeat(val_w + 2)
        )
    };

    let _ = writeln!(
        out,
        "{INDENT}┌─ {} ─┐",
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(out, "{}", rule("┌", "┬", "┐"));
    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{INDENT}│ {:<key_w$} │ {:>val_w$} │",
            truncate(key, key_w),
            truncate(val, val_w)
        );
    }
    let _ = writeln!(out, "{}", rule("└", "┴", "┘"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(rows: &[(String, String)]) -> Vec<String> {
        let mut buf = Vec::new();
        print_kv_table(&mut buf, "Name Index", rows);
        String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn kv_table_rows_share_one_width() {
        let lines = render(&[
            ("Entries".to_string(), "431".to_string()),
            ("Without CASN".to_string(), "2".to_string()),
        ]);

        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("Name Index"));
        let width = lines[1].chars().count();
        assert!(lines[1..].iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn kv_table_truncates_long_values() {
        let long_path = "out/".repeat(40);
        let lines = render(&[("interaction parse".to_string(), long_path)]);
        assert!(lines[2].contains('…'));
        assert_eq!(lines[2].chars().count(), lines[1].chars().count());
    }
}
