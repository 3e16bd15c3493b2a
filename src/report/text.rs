use crate::model::record::join_scores;
use crate::report::{RosterRow, format_average};
use crate::storage::format::NO_SCORES_PLACEHOLDER;

const HEADERS: [&str; 4] = ["Student Name", "Average", "Grade", "Scores"];

pub fn render_roster_text(rows: &[RosterRow]) -> String {
    if rows.is_empty() {
        return "Roster is empty.\n".to_string();
    }

    let cells = rows
        .iter()
        .map(|row| {
            let scores = if row.scores.is_empty() {
                NO_SCORES_PLACEHOLDER.to_string()
            } else {
                join_scores(&row.scores)
            };
            [
                row.name.clone(),
                format_average(row.average),
                row.grade.to_string(),
                scores,
            ]
        })
        .collect::<Vec<_>>();

    let mut widths = HEADERS.map(str::len);
    for line in &cells {
        for (w, cell) in widths.iter_mut().zip(line.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule = widths.map(|w| "-".repeat(w));
    push_line(&mut out, &rule, &widths);
    for line in &cells {
        push_line(&mut out, line, &widths);
    }
    out.push_str(&format!("{} record(s)\n", rows.len()));
    out
}

fn push_line(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line = format!(
        "{:<w0$}  {:>w1$}  {:<w2$}  {}",
        cells[0],
        cells[1],
        cells[2],
        cells[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
    );
    out.push_str(line.trim_end());
    out.push('\n');
}
