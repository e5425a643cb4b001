use crate::domain::model::StatisticsReport;
use crate::utils::error::{Result, StatsError};
use serde::{Deserialize, Serialize};

pub const HEADERS: [&str; 4] = [
    "Programming language",
    "Vacancies found",
    "Vacancies processed",
    "Average salary",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Tsv,
    Json,
}

pub fn render(report: &StatisticsReport, format: OutputFormat) -> Result<String> {
    render_all(std::slice::from_ref(report), format)
}

/// Renders several reports as one document: consecutive tables, a single
/// CSV/TSV stream with one header, or one JSON array.
pub fn render_all(reports: &[StatisticsReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(reports
            .iter()
            .map(render_table)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Csv => render_delimited(reports, b','),
        OutputFormat::Tsv => render_delimited(reports, b'\t'),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(reports)?),
    }
}

fn rows(report: &StatisticsReport) -> Vec<[String; 4]> {
    report
        .rows
        .iter()
        .map(|row| {
            [
                row.language.clone(),
                row.statistic.vacancies_found.to_string(),
                row.statistic.vacancies_processed.to_string(),
                row.statistic.average_salary.to_string(),
            ]
        })
        .collect()
}

/// Plain ASCII table with the title written into the top border.
pub fn render_table(report: &StatisticsReport) -> String {
    let header = HEADERS.map(String::from);
    let body = rows(report);

    let mut widths = header.each_ref().map(|h| h.chars().count());
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = {
        let mut line = String::from("+");
        for width in &widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line
    };

    let line = |cells: &[String; 4]| {
        let mut out = String::from("|");
        for (cell, width) in cells.iter().zip(&widths) {
            let pad = width - cell.chars().count();
            out.push(' ');
            out.push_str(cell);
            out.push_str(&" ".repeat(pad + 1));
            out.push('|');
        }
        out
    };

    let mut lines = vec![title_border(&separator, &report.title), line(&header), separator.clone()];
    lines.extend(body.iter().map(line));
    lines.push(separator);
    lines.join("\n")
}

fn title_border(separator: &str, title: &str) -> String {
    let border_len = separator.chars().count();
    let title_len = title.chars().count();
    if title.is_empty() || title_len > border_len - 2 {
        return separator.to_string();
    }
    let mut out = String::from("+");
    out.push_str(title);
    out.extend(separator.chars().skip(title_len + 1));
    out
}

fn render_delimited(reports: &[StatisticsReport], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    let mut header = vec!["source"];
    header.extend(HEADERS);
    writer.write_record(&header)?;
    for report in reports {
        for row in rows(report) {
            let mut record = vec![report.title.as_str()];
            record.extend(row.iter().map(String::as_str));
            writer.write_record(&record)?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| StatsError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| StatsError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
