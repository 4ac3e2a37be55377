use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Table};
use datagrid_lib::table::{CheckState, TableView};
use datagrid_lib::{Column, Direction, Record, RowId, TableOptions, TableState};
use log::{debug, info};

use crate::cli::TableArgs;
use crate::config::TableSettings;
use crate::error::CliError;

pub fn run(args: &TableArgs, settings: &TableSettings) -> Result<String, CliError> {
    let rows = load_rows(&args.file)?;
    let columns = match args.columns.as_deref().or(settings.columns.as_deref()) {
        Some(spec) => parse_columns(spec)?,
        None => infer_columns(&rows),
    };

    let selection = args.select_all || !args.select.is_empty();
    let mut options = TableOptions::new()
        .with_items_per_page(args.per_page.unwrap_or(settings.per_page))
        .with_selection(selection);
    if let Some(key) = args.sort.as_ref().or(settings.sort.as_ref()) {
        let direction = if args.desc || settings.descending {
            Direction::Desc
        } else {
            Direction::Asc
        };
        options = options.with_default_sort(key.clone(), direction);
    }

    let mut table = TableState::new(rows, options);
    info!("[table] loaded {} rows from {}", table.total_items(), args.file.display());

    for raw in &args.select {
        let Ok(id) = raw.parse::<RowId>();
        table.toggle_selection(id);
    }
    table.go_to_page(args.page);
    if args.select_all {
        table.select_all();
    }

    Ok(render(&table.view(&columns), args.compact))
}

fn load_rows(path: &Path) -> Result<Vec<Record>, CliError> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| CliError::rows(path, e))
}

/// Parses `key[:Label],...`; a missing label reuses the key.
fn parse_columns(spec: &str) -> Result<Vec<Column<Record>>, CliError> {
    spec.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (key, label) = part.split_once(':').unwrap_or((part, part));
            let key = key.trim();
            if key.is_empty() {
                return Err(CliError::InvalidColumn(part.to_string()));
            }
            Ok(Column::new(key, label.trim()))
        })
        .collect()
}

/// Every field seen in the rows, in first-seen order.
fn infer_columns(rows: &[Record]) -> Vec<Column<Record>> {
    let mut keys: Vec<&str> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
    debug!("[table] inferred columns: {:?}", keys);
    keys.into_iter().map(|key| Column::new(key, key)).collect()
}

fn render(view: &TableView, compact: bool) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS);

    let mut header = Vec::new();
    if let Some(state) = view.select_all {
        header.push(Cell::new(checkbox(state)));
    }
    for cell in &view.headers {
        let text = match &cell.indicator {
            Some(indicator) => format!("{} {}", cell.label, indicator),
            None => cell.label.clone(),
        };
        header.push(Cell::new(text).add_attribute(Attribute::Bold));
    }
    table.set_header(header);

    for row in &view.rows {
        let mut cells = Vec::new();
        if view.select_all.is_some() {
            cells.push(Cell::new(if row.selected { "[x]" } else { "[ ]" }));
        }
        cells.extend(row.cells.iter().map(Cell::new));
        table.add_row(cells);
    }

    let mut lines = vec![table.to_string()];
    if let Some(message) = view.empty_message {
        lines.push(message.to_string());
    }
    if let Some(label) = &view.range_label {
        lines.push(format!("{}  {}", label, page_bar(view, compact)));
    }
    if let Some(summary) = &view.selection_summary {
        lines.push(summary.clone());
    }
    lines.join("\n")
}

fn checkbox(state: CheckState) -> &'static str {
    match state {
        CheckState::Unchecked => "[ ]",
        CheckState::Checked => "[x]",
        CheckState::Indeterminate => "[-]",
    }
}

fn page_bar(view: &TableView, compact: bool) -> String {
    let button = |page: usize| {
        if page == view.current_page {
            format!("[{}]", page)
        } else {
            page.to_string()
        }
    };

    let mut parts = vec![if view.can_go_prev { "<" } else { " " }.to_string()];
    if compact {
        let pages = &view.compact_pages;
        parts.extend(pages.leading.iter().map(|&page| button(page)));
        match pages.overflow_len() {
            0 => {}
            1 => parts.push(format!("…({})", pages.overflow.start())),
            _ => parts.push(format!("…({}-{})", pages.overflow.start(), pages.overflow.end())),
        }
        parts.extend(pages.trailing.iter().map(|&page| button(page)));
    } else {
        parts.extend(view.page_buttons.iter().map(|&page| button(page)));
    }
    parts.push(if view.can_go_next { ">" } else { " " }.to_string());
    parts.join(" ")
}
