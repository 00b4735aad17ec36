use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use feed_cli::report::{CategoryReport, CategoryStatus, FetchStatus, PublishOutcome, RunReport};

pub fn print_summary(report: &RunReport) {
    println!("Output: {}", report.output_path.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Input"),
        header_cell("Fetch"),
        header_cell("Status"),
        header_cell("Rows"),
        header_cell("Priced"),
        header_cell("Unpriced"),
        header_cell("Dropped"),
        header_cell(&format!("Total ({})", report.currency)),
    ]);
    apply_summary_table_style(&mut table);
    for index in 4..=8 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut total_priced = 0usize;
    let mut total_unpriced = 0usize;
    let mut total_dropped = 0usize;
    let mut total_amount = 0f64;
    for category in &report.categories {
        let prices = category.prices();
        if let Some(prices) = prices {
            total_priced += prices.priced;
            total_unpriced += prices.unresolved;
            total_dropped += prices.dropped;
            total_amount += prices.total_amount;
        }
        table.add_row(vec![
            Cell::new(category.category.label())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(category.path.display()),
            fetch_cell(&category.fetch),
            status_cell(category),
            Cell::new(category.rows()),
            count_cell(prices.map(|p| p.priced), Color::Green),
            count_cell(prices.map(|p| p.unresolved), Color::Yellow),
            count_cell(prices.map(|p| p.dropped), Color::Yellow),
            prices.map_or_else(|| dim_cell("-"), |p| Cell::new(format!("{:.2}", p.total_amount))),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(format!(
            "{}/{} processed",
            report.processed(),
            report.categories.len()
        ))
        .add_attribute(Attribute::Bold),
        Cell::new(report.rows).add_attribute(Attribute::Bold),
        count_cell(Some(total_priced), Color::Green).add_attribute(Attribute::Bold),
        count_cell(Some(total_unpriced), Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(Some(total_dropped), Color::Yellow).add_attribute(Attribute::Bold),
        Cell::new(format!("{total_amount:.2}")).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    print_publish(&report.publish);
}

fn print_publish(publish: &PublishOutcome) {
    match publish {
        PublishOutcome::Skipped { reason } => println!("Upload: skipped ({reason})"),
        PublishOutcome::Published {
            bucket,
            uploaded,
            failed,
        } => {
            println!("Upload: {} file(s) to {bucket}", uploaded.len());
            for destination in uploaded {
                println!("  {destination}");
            }
            if !failed.is_empty() {
                eprintln!("Failed uploads:");
                for destination in failed {
                    eprintln!("- {destination}");
                }
            }
        }
        PublishOutcome::Failed { message } => eprintln!("Upload: failed ({message})"),
    }
}

pub fn print_config(entries: &[(&'static str, String)]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Setting"), header_cell("Value")]);
    apply_table_style(&mut table);
    for (key, value) in entries {
        let value_cell = if value == "-" {
            dim_cell(value)
        } else {
            Cell::new(value)
        };
        table.add_row(vec![Cell::new(key), value_cell]);
    }
    println!("{table}");
}

pub fn print_shapes(shapes: &[(&'static str, &'static str)]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Shape"), header_cell("Fallback image")]);
    apply_table_style(&mut table);
    for (shape, url) in shapes {
        table.add_row(vec![
            Cell::new(shape).add_attribute(Attribute::Bold),
            Cell::new(url),
        ]);
    }
    println!("{table}");
}

fn fetch_cell(fetch: &FetchStatus) -> Cell {
    match fetch {
        FetchStatus::NotAttempted => dim_cell("-"),
        FetchStatus::Fetched { .. } => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        FetchStatus::Failed {
            stale_input_secs: Some(age_secs),
            ..
        } => Cell::new(format!("failed (staged {age_secs}s ago)")).fg(Color::Yellow),
        FetchStatus::Failed { .. } => Cell::new("failed").fg(Color::Red),
    }
}

fn status_cell(category: &CategoryReport) -> Cell {
    match &category.status {
        CategoryStatus::Processed {
            missing_identifiers,
            ..
        } if *missing_identifiers > 0 => {
            Cell::new(format!("processed ({missing_identifiers} without id)")).fg(Color::Yellow)
        }
        CategoryStatus::Processed { .. } => Cell::new("processed").fg(Color::Green),
        CategoryStatus::Missing => Cell::new("missing").fg(Color::Yellow),
        CategoryStatus::Failed { message } => Cell::new(format!("failed: {message}")).fg(Color::Red),
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
