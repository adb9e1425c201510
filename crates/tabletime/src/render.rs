//! Text rendering of responses for the console

use std::fmt::Write;
use tabletime_api::{ArchiveReport, CurrentReport, Response, TableSnapshot};
use tabletime_util::{format_clock_time, format_minutes, format_money};

/// Render a response as human-readable text (no trailing newline)
pub fn render_response(response: &Response) -> String {
    match response {
        Response::Occupied {
            table_id,
            started_at,
            ..
        } => format!("Table {} occupied at {}", table_id, format_clock_time(started_at)),
        Response::Freed {
            table_id,
            minutes,
            charge,
            ..
        } => format!(
            "Table {} freed after {}, charge {}",
            table_id,
            format_minutes(*minutes),
            format_money(*charge)
        ),
        Response::Rejected { reason } => format!("Rejected: {}", reason),
        Response::Tables { tables } => render_tables(tables),
        Response::Current { report } => render_current(report),
        Response::Archive { report } => render_archive(report),
    }
}

pub fn render_tables(tables: &[TableSnapshot]) -> String {
    if tables.is_empty() {
        return "No tables".to_string();
    }

    tables
        .iter()
        .map(|table| match &table.session_start {
            Some(start) => format!(
                "Table {:>3}: occupied since {}",
                table.table_id,
                format_clock_time(start)
            ),
            None => format!("Table {:>3}: free", table.table_id),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_current(report: &CurrentReport) -> String {
    let mut out = format!(
        "Current statistics ({})\n",
        format_clock_time(&report.generated_at)
    );

    for line in &report.per_table {
        if line.occupied {
            let _ = writeln!(
                out,
                "Table {}: occupied ({}), owed so far {}",
                line.table_id,
                format_minutes(line.minutes_so_far),
                format_money(line.owed_so_far)
            );
        } else {
            let _ = writeln!(out, "Table {}: free", line.table_id);
        }
    }

    let _ = write!(
        out,
        "\nTotal if every guest left now: {}",
        format_money(report.total_owed_if_all_left_now)
    );
    out
}

pub fn render_archive(report: &ArchiveReport) -> String {
    let mut out = String::from("Archive statistics\n");

    for line in &report.per_table {
        let _ = writeln!(
            out,
            "Table {}: {} occupied, earned {} ({} visits)",
            line.table_id,
            format_minutes(line.total_minutes_occupied),
            format_money(line.total_earnings),
            line.occupancy_count
        );
    }

    out.push('\n');
    if let Some(id) = report.most_popular_table_id {
        let _ = writeln!(out, "Most popular table: {}", id);
    }
    if let Some(id) = report.highest_earning_table_id {
        let _ = writeln!(out, "Highest earning table: {}", id);
    }
    let _ = write!(
        out,
        "Total earnings: {}",
        format_money(report.grand_total_earnings)
    );
    out
}
