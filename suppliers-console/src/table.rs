use suppliers_core::Supplier;

const HEADERS: [&str; 5] = ["ID", "Name", "Category", "Available", "Status"];

/// Renders search results as a left-aligned text table.
pub fn render(suppliers: &[Supplier]) -> String {
    let rows: Vec<[String; 5]> = suppliers
        .iter()
        .map(|s| {
            [
                s.id.map(|id| id.to_string()).unwrap_or_default(),
                s.name.clone(),
                s.category.clone(),
                s.available.to_string(),
                s.status.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = width))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_aligns_columns() {
        let suppliers = vec![
            Supplier::new("Acme", "tools", true).with_id(1),
            Supplier::new("Globex Corporation", "food", false).with_id(12),
        ];

        let table = render(&suppliers);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "ID  Name                Category  Available  Status");
        assert_eq!(lines[2], "1   Acme                tools     true       active");
        assert_eq!(lines[3], "12  Globex Corporation  food      false      active");
    }

    #[test]
    fn test_render_empty_has_header_only() {
        let table = render(&[]);
        assert_eq!(table.lines().count(), 2);
    }
}
