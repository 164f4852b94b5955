use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use strokeforge::calibrate::CalibrationRow;
use strokeforge::catalog::CharacterPattern;
use strokeforge::config::ValidationParams;
use strokeforge::scorer::ValidationResult;
use strokeforge::templates::TemplateLibrary;

fn opt(v: Option<f32>) -> String {
    v.map(|x| format!("{:.3}", x)).unwrap_or_else(|| "-".to_string())
}

pub fn print_validation_report(symbol: &str, res: &ValidationResult, p: &ValidationParams) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let verdict = if res.valid {
        Cell::new("PASS").fg(Color::Green)
    } else {
        Cell::new("FAIL").fg(Color::Red)
    };

    table.add_row(vec![
        Cell::new("Symbol").add_attribute(Attribute::Bold),
        Cell::new(symbol),
    ]);
    table.add_row(vec![Cell::new("Verdict").add_attribute(Attribute::Bold), verdict]);
    table.add_row(vec![
        Cell::new("Score").add_attribute(Attribute::Bold),
        Cell::new(format!("{:.3} (pass ≥ {:.2})", res.score, p.pass_threshold)).fg(Color::Cyan),
    ]);
    table.add_row(vec![
        Cell::new("Reason").add_attribute(Attribute::Bold),
        Cell::new(format!("{} ({})", res.reason, res.reason.message())),
    ]);

    if let Some(d) = &res.details {
        table.add_row(vec![
            Cell::new(format!("DTW x{:.2}", p.weight_dtw)),
            Cell::new(format!("{:.3}", d.dtw_score)),
        ]);
        table.add_row(vec![
            Cell::new(format!("Image x{:.2}", p.weight_image)),
            Cell::new(format!("{:.3}", d.image_score)),
        ]);
        table.add_row(vec![
            Cell::new(format!("Strokes x{:.2}", p.weight_stroke_count)),
            Cell::new(format!("{:.3}", d.stroke_count_score)),
        ]);
        table.add_row(vec![Cell::new("IoU"), Cell::new(opt(d.iou))]);
        table.add_row(vec![Cell::new("Coverage"), Cell::new(opt(d.coverage))]);
        table.add_row(vec![Cell::new("Aspect"), Cell::new(opt(d.aspect_ratio))]);
        if let Some(ok) = d.aspect_in_range {
            table.add_row(vec![
                Cell::new("Aspect in range"),
                Cell::new(if ok { "yes" } else { "no" }),
            ]);
        }
        table.add_row(vec![
            Cell::new("Direction agreement"),
            Cell::new(opt(d.direction_agreement)),
        ]);
    }

    if let Some(col) = table.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    println!("\n{}", table);
}

pub fn print_catalog<'a, I>(patterns: I, templates: &TemplateLibrary)
where
    I: IntoIterator<Item = &'a CharacterPattern>,
{
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Symbol").add_attribute(Attribute::Bold),
        Cell::new("Expected"),
        Cell::new("Min"),
        Cell::new("Template"),
        Cell::new("Shape"),
        Cell::new("Aspect"),
        Cell::new("Hints"),
    ]);

    for p in patterns {
        let shape = if p.is_circular {
            "circular"
        } else if p.has_circular_part {
            "mixed"
        } else if p.is_angular {
            "angular"
        } else {
            "-"
        };
        let aspect = p
            .aspect_ratio
            .map(|a| format!("{:.1}..{:.1}", a.min, a.max))
            .unwrap_or_else(|| "-".to_string());
        let hints: Vec<String> = p
            .stroke_hints
            .iter()
            .map(|h| match h.direction {
                Some(d) => format!("{} {}", d, h.kind),
                None => h.kind.to_string(),
            })
            .collect();
        let template = templates
            .get(p.symbol)
            .map(|t| t.len().to_string())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(p.symbol).add_attribute(Attribute::Bold),
            Cell::new(p.expected_strokes),
            Cell::new(p.effective_min_strokes()),
            Cell::new(template),
            Cell::new(shape),
            Cell::new(aspect),
            Cell::new(hints.join(", ")),
        ]);
    }

    for i in 1..=3 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("\n{}", table);
}

pub fn print_calibration_report(rows: &[CalibrationRow], jitter: f32) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Symbol").add_attribute(Attribute::Bold),
        Cell::new("Trials"),
        Cell::new(format!("Pass % (±{:.1})", jitter)).fg(Color::Cyan),
        Cell::new("Mean"),
        Cell::new("Min"),
        Cell::new("Top Failure").fg(Color::Red),
    ]);

    for r in rows {
        let rate = Cell::new(format!("{:.1}", r.pass_rate * 100.0));
        let rate = if r.pass_rate < 0.9 {
            rate.fg(Color::Red)
        } else {
            rate.fg(Color::Green)
        };
        table.add_row(vec![
            Cell::new(r.symbol).add_attribute(Attribute::Bold),
            Cell::new(r.trials),
            rate,
            Cell::new(format!("{:.3}", r.mean_score)),
            Cell::new(format!("{:.3}", r.min_score)),
            Cell::new(
                r.top_failure
                    .map(|f| f.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }

    for i in 1..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("\n{}", table);
}
