//! Fixed-width text tables for the original and accepted record sets.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::info;

use crate::{
    config::report::{ReportConfig, SortKey},
    core::{
        orchestrator::RunOutput,
        types::{Record, TransformedRecord},
    },
};

use super::Result;

const TOP_RULE: &str = "_________________________________________________________";
const RULE: &str = "|-------------------------------------------------------|";
const HEADER: &str = "| ID          | Name                           | Age    |";

const NO_ORIGINALS: &str =
    "No records. Either there was no data to begin with, or all of it was filtered.";
const NO_ACCEPTED: &str =
    "No transformed records. Either there was no data to begin with, or all of it was filtered.";

/// Anything that can be rendered as a report row.
pub trait Row {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
    fn age(&self) -> f64;
}

impl Row for Record {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn age(&self) -> f64 {
        self.age
    }
}

impl Row for TransformedRecord {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn age(&self) -> f64 {
        self.age
    }
}

pub fn write_table<W, R>(out: &mut W, title: &str, rows: &[R], empty: &str) -> Result<()>
where
    W: Write,
    R: Row,
{
    if rows.is_empty() {
        writeln!(out, "{}", empty)?;
        return Ok(());
    }

    writeln!(out, "{}", TOP_RULE)?;
    writeln!(out, "| {:<51} |", title)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{}", HEADER)?;
    writeln!(out, "{}", RULE)?;
    for row in rows {
        writeln!(
            out,
            "| {:<11} | {:<30} | {:<6.2} |",
            row.id(),
            row.name(),
            row.age()
        )?;
    }
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;

    Ok(())
}

pub fn write_summary<W, R>(out: &mut W, rows: &[R]) -> Result<()>
where
    W: Write,
    R: Row,
{
    let id_sum = rows.iter().map(|r| r.id()).fold(0i64, i64::wrapping_add);
    let age_sum: f64 = rows.iter().map(|r| r.age()).sum();

    writeln!(out, "ID sum: {}", id_sum)?;
    writeln!(out, "Age sum: {}", age_sum)?;

    Ok(())
}

pub fn sort_rows<R: Row>(rows: &mut [R], key: SortKey) {
    match key {
        SortKey::Id => rows.sort_by_key(|r| r.id()),
        SortKey::Age => rows.sort_by(|a, b| a.age().total_cmp(&b.age())),
    }
}

/// Renders both tables of a run into `out`.
pub fn render<W: Write>(out: &mut W, cfg: &ReportConfig, output: &RunOutput) -> Result<()> {
    let mut accepted = output.accepted.clone();
    if let Some(key) = cfg.sort_by {
        sort_rows(&mut accepted, key);
    }

    write_table(out, &cfg.originals_title, &output.originals, NO_ORIGINALS)?;
    write_table(out, &cfg.accepted_title, &accepted, NO_ACCEPTED)?;
    if cfg.summary {
        write_summary(out, &accepted)?;
    }

    Ok(())
}

/// Writes the report file, truncating it unless `append` is configured.
pub fn save(cfg: &ReportConfig, output: &RunOutput) -> Result<()> {
    info!(
        "Saving {} original and {} accepted records to {}",
        output.originals.len(),
        output.accepted.len(),
        cfg.path.display()
    );

    let file = open(&cfg.path, cfg.append)?;
    let mut writer = BufWriter::new(file);
    render(&mut writer, cfg, output)?;
    writer.flush()?;

    Ok(())
}

fn open(path: &Path, append: bool) -> std::io::Result<File> {
    if append {
        File::options().append(true).create(true).open(path)
    } else {
        File::create(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transformed(id: i64, age: f64) -> TransformedRecord {
        TransformedRecord {
            original: Record::new(-id, -age, "orig"),
            id,
            age,
            name: "DERIVED".into(),
        }
    }

    fn render_to_string(cfg: &ReportConfig, output: &RunOutput) -> String {
        let mut buf = Vec::new();
        render(&mut buf, cfg, output).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_table_layout() {
        let mut buf = Vec::new();
        write_table(&mut buf, "People", &[Record::new(12, 3.456, "Ann")], "none").unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], TOP_RULE);
        assert_eq!(lines[1], format!("| {:<51} |", "People"));
        assert_eq!(lines[3], HEADER);
        assert_eq!(
            lines[5],
            "| 12          | Ann                            | 3.46   |"
        );
        assert_eq!(lines[6], RULE);
        assert_eq!(lines[7], "");
        assert_eq!(lines[1].len(), 55);
        assert!(lines
            .iter()
            .take(7)
            .enumerate()
            .filter(|(i, _)| *i != 1)
            .all(|(_, l)| l.len() == TOP_RULE.len()));
    }

    #[test]
    fn test_empty_table() {
        let mut buf = Vec::new();
        write_table::<_, Record>(&mut buf, "People", &[], "nothing here").unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "nothing here\n");
    }

    #[test]
    fn test_render_sorted_with_summary() {
        let cfg = ReportConfig {
            sort_by: Some(SortKey::Age),
            summary: true,
            ..ReportConfig::default()
        };
        let output = RunOutput {
            originals: vec![Record::new(1, 1.0, "a")],
            accepted: vec![transformed(-1, -0.5), transformed(-2, -3.0)],
        };

        let text = render_to_string(&cfg, &output);
        let first = text.find("| -2 ").unwrap();
        let second = text.find("| -1 ").unwrap();

        assert!(first < second);
        assert!(text.contains("ID sum: -3\n"));
        assert!(text.contains("Age sum: -3.5\n"));
    }

    #[test]
    fn test_save_truncates_then_appends() {
        let dir = tempfile::tempdir().unwrap();
        let output = RunOutput {
            originals: vec![Record::new(1, 1.0, "a")],
            accepted: vec![],
        };
        let mut cfg = ReportConfig {
            path: dir.path().join("report.txt"),
            ..ReportConfig::default()
        };

        save(&cfg, &output).unwrap();
        save(&cfg, &output).unwrap();
        let once = std::fs::read_to_string(&cfg.path).unwrap();
        assert!(once.ends_with(&format!("{}\n", NO_ACCEPTED)));

        cfg.append = true;
        save(&cfg, &output).unwrap();
        let twice = std::fs::read_to_string(&cfg.path).unwrap();
        assert_eq!(twice.len(), once.len() * 2);
    }
}
