use bpp::{
    aggregate::{CompletionStatus, Sales, SalesSource},
    model::Attribution,
    numeric::{ParseError, encode_cell, format_id},
    period::PeriodRecord,
    workflow::Outcome,
};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

pub fn build_parse_table(results: &[(String, Result<Option<f64>, ParseError>)]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Input", "Value", "Displayed", "Error"]);
    for (raw, result) in results {
        let row = match result {
            Ok(Some(value)) => vec![
                Cell::new(format!("{raw:?}")),
                Cell::new(value).set_alignment(CellAlignment::Right),
                Cell::new(format_id(*value, 2)).set_alignment(CellAlignment::Right),
                Cell::new(""),
            ],
            Ok(None) => vec![
                Cell::new(format!("{raw:?}")),
                Cell::new("not provided").add_attribute(Attribute::Dim),
                Cell::new(""),
                Cell::new(""),
            ],
            Err(error) => vec![
                Cell::new(format!("{raw:?}")),
                Cell::new(""),
                Cell::new(""),
                Cell::new(error).fg(Color::Red),
            ],
        };
        table.add_row(row);
    }
    table
}

pub fn build_status_table(current: &PeriodRecord) -> Table {
    let status = CompletionStatus::of(current);
    let mut table = new_table();
    table.set_header(vec!["Component", "Total", "Filled in"]);
    for (component, total) in current.totals().iter() {
        let is_complete = status.is_complete(component);
        table.add_row(vec![
            Cell::new(component),
            Cell::new(total).set_alignment(CellAlignment::Right),
            Cell::new(if is_complete { "yes" } else { "no" })
                .fg(if is_complete { Color::Green } else { Color::Red }),
        ]);
    }
    table.add_row(vec![
        Cell::new("Timestamp").add_attribute(Attribute::Dim),
        Cell::new(current.timestamp.map_or_else(String::new, |timestamp| timestamp.to_string())),
        Cell::new(""),
    ]);
    table
}

pub fn build_sales_table(sales: &Sales) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Component", "Total"]);
    for (component, total) in sales.components.iter() {
        table.add_row(vec![
            Cell::new(component),
            Cell::new(total).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total sales").add_attribute(Attribute::Bold),
        Cell::new(sales.total).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Source").add_attribute(Attribute::Dim),
        Cell::new(sales.source).fg(match sales.source {
            SalesSource::Current => Color::Green,
            SalesSource::LastComplete => Color::DarkYellow,
            SalesSource::None => Color::Red,
        }),
    ]);
    if let Some(timestamp) = sales.timestamp {
        table.add_row(vec![Cell::new("Timestamp").add_attribute(Attribute::Dim), Cell::new(timestamp)]);
    }
    table
}

pub fn build_outcome_table(outcome: &Outcome) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    for (component, total) in &outcome.totals {
        table.add_row(vec![
            Cell::new(component).add_attribute(Attribute::Bold),
            Cell::new(total).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
        ]);
    }
    for (column, value) in &outcome.fields {
        table.add_row(vec![
            Cell::new(column.as_str()).add_attribute(Attribute::Dim),
            Cell::new(encode_cell(*value)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_attribution_table(attributions: &[Attribution]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Feature", "Value", "Contribution"]);
    for attribution in attributions {
        table.add_row(vec![
            Cell::new(attribution.feature),
            Cell::new(format_id(attribution.value, 2)).set_alignment(CellAlignment::Right),
            Cell::new(format_id(attribution.contribution, 2))
                .set_alignment(CellAlignment::Right)
                .fg(if attribution.contribution > 0.0 {
                    Color::Red
                } else if attribution.contribution < 0.0 {
                    Color::Green
                } else {
                    Color::Reset
                }),
        ]);
    }
    table
}
