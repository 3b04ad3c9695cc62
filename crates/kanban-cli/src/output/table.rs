//! Aligned plain-text tables.
//!
//! Widths count characters, not bytes. Color codes are added after padding,
//! so they never affect alignment.

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_WIDTH: usize = 4;
const GAP: &str = "  ";

/// Render `rows` under `headers`. Missing cells print as `-`.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths = column_widths(headers, rows);
    if let Some(max_width) = options.max_width {
        shrink_to(&mut widths, headers, max_width);
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(
        headers
            .iter()
            .zip(&widths)
            .map(|(header, &width)| pad(&fit(header, width), width))
            .collect::<Vec<_>>()
            .join(GAP),
    );
    lines.push("-".repeat(widths.iter().sum::<usize>() + GAP.len() * widths.len().saturating_sub(1)));

    for row in rows {
        let cells = headers
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(index, (header, &width))| {
                let text = fit(row.get(index).map_or("-", String::as_str), width);
                match color_code(header, &text).filter(|_| options.color) {
                    Some(code) => {
                        let padding = " ".repeat(width - text.chars().count());
                        format!("\u{1b}[{code}m{text}\u{1b}[0m{padding}")
                    }
                    None => pad(&text, width),
                }
            })
            .collect::<Vec<_>>();
        lines.push(cells.join(GAP));
    }

    lines.join("\n")
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain([header.chars().count(), MIN_WIDTH])
                .max()
                .unwrap_or(MIN_WIDTH)
        })
        .collect()
}

/// Take one column of width at a time from the widest column until the
/// table fits. A column never shrinks below its header.
fn shrink_to(widths: &mut [usize], headers: &[&str], max_width: usize) {
    let gaps = GAP.len() * widths.len().saturating_sub(1);
    let mut overflow = (widths.iter().sum::<usize>() + gaps).saturating_sub(max_width);
    let floor = |index: usize| headers[index].chars().count().max(MIN_WIDTH);

    while overflow > 0 {
        let Some(widest) = (0..widths.len())
            .filter(|&index| widths[index] > floor(index))
            .max_by_key(|&index| widths[index])
        else {
            break;
        };
        widths[widest] -= 1;
        overflow -= 1;
    }
}

fn fit(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(value: &str, width: usize) -> String {
    format!("{value:<width$}")
}

fn color_code(header: &str, value: &str) -> Option<&'static str> {
    match (header, value) {
        ("status", "done") | ("priority", "low") => Some("32"),
        ("status", "in_progress") | ("priority", "medium") => Some("33"),
        ("priority", "high") => Some("31"),
        _ => None,
    }
}
