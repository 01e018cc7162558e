//! Table projections of the record list
//!
//! Two read-only views, rebuilt from scratch after every mutation:
//! - `BasicTable`: one row per employee
//! - `AdvancedTable`: one row per field, one column per employee
//!
//! Both carry the record index so the UI can attach Edit/Delete actions.
//! `Display` renders them as aligned plain text.

use std::fmt;

use crate::record::EmployeeRecord;

/// Field labels, in display order
pub const FIELD_LABELS: [&str; 6] = ["Name", "Gender", "DOB", "Email", "Phone No", "Hobbies"];

/// Shown instead of the advanced table when there are no employees
pub const EMPTY_PLACEHOLDER: &str = "No employees available.";

fn cells(record: &EmployeeRecord) -> [String; 6] {
    [
        record.name.clone(),
        record.gender.to_string(),
        record.dob_display(),
        record.email.clone(),
        record.phone.clone(),
        record.hobbies_display(),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicRow {
    pub index: usize,
    pub cells: [String; 6],
}

/// Row-per-employee view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasicTable {
    pub rows: Vec<BasicRow>,
}

impl BasicTable {
    pub fn from_records(records: &[EmployeeRecord]) -> Self {
        Self {
            rows: records
                .iter()
                .enumerate()
                .map(|(index, record)| BasicRow {
                    index,
                    cells: cells(record),
                })
                .collect(),
        }
    }

    pub fn headers(&self) -> &'static [&'static str] {
        &FIELD_LABELS
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvancedRow {
    pub label: &'static str,
    pub cells: Vec<String>,
}

/// Field-per-employee view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdvancedTable {
    /// Record index of each column
    pub columns: Vec<usize>,
    pub rows: Vec<AdvancedRow>,
}

impl AdvancedTable {
    pub fn from_records(records: &[EmployeeRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let per_record: Vec<[String; 6]> = records.iter().map(cells).collect();
        let rows = FIELD_LABELS
            .iter()
            .enumerate()
            .map(|(i, label)| AdvancedRow {
                label: *label,
                cells: per_record.iter().map(|c| c[i].clone()).collect(),
            })
            .collect();
        Self {
            columns: (0..records.len()).collect(),
            rows,
        }
    }

    /// No employees: render `EMPTY_PLACEHOLDER` instead
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Write rows as space-padded columns
fn write_grid(f: &mut fmt::Formatter<'_>, grid: &[Vec<String>]) -> fmt::Result {
    let columns = grid.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            grid.iter()
                .filter_map(|row| row.get(c))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    for row in grid {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(f, "{}", line.trim_end())?;
    }
    Ok(())
}

impl fmt::Display for BasicTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut grid = Vec::with_capacity(self.rows.len() + 1);
        grid.push(
            std::iter::once("#")
                .chain(FIELD_LABELS)
                .map(String::from)
                .collect(),
        );
        for row in &self.rows {
            grid.push(
                std::iter::once(row.index.to_string())
                    .chain(row.cells.iter().cloned())
                    .collect(),
            );
        }
        write_grid(f, &grid)
    }
}

impl fmt::Display for AdvancedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "{}", EMPTY_PLACEHOLDER);
        }
        let mut grid = Vec::with_capacity(self.rows.len() + 1);
        grid.push(
            std::iter::once(String::from("#"))
                .chain(self.columns.iter().map(usize::to_string))
                .collect(),
        );
        for row in &self.rows {
            grid.push(
                std::iter::once(row.label.to_string())
                    .chain(row.cells.iter().cloned())
                    .collect(),
            );
        }
        write_grid(f, &grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::employee;

    #[test]
    fn test_basic_row_per_employee() {
        let records = vec![employee("Alice"), employee("Bob")];
        let table = BasicTable::from_records(&records);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].index, 1);
        assert_eq!(table.rows[1].cells[0], "Bob");
        assert_eq!(table.rows[0].cells[1], "Female");
        assert_eq!(table.rows[0].cells[2], "1990-01-01");
        assert_eq!(table.rows[0].cells[5], "Reading");
        assert_eq!(table.headers()[4], "Phone No");
    }

    #[test]
    fn test_advanced_field_per_row() {
        let records = vec![employee("Alice"), employee("Bob"), employee("Carol")];
        let table = AdvancedTable::from_records(&records);
        assert_eq!(table.columns, vec![0, 1, 2]);
        assert_eq!(table.rows.len(), FIELD_LABELS.len());
        assert_eq!(table.rows[0].label, "Name");
        assert_eq!(table.rows[0].cells, vec!["Alice", "Bob", "Carol"]);
        assert_eq!(table.rows[3].label, "Email");
    }

    #[test]
    fn test_advanced_empty_placeholder() {
        let table = AdvancedTable::from_records(&[]);
        assert!(table.is_empty());
        assert_eq!(table.to_string(), "No employees available.\n");
    }

    #[test]
    fn test_basic_display_aligns_columns() {
        let table = BasicTable::from_records(&[employee("Al"), employee("Bartholomew")]);
        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("#  Name         Gender"));
        assert!(lines[1].starts_with("0  Al           Female"));
        assert!(lines[2].starts_with("1  Bartholomew  Female"));
    }

    #[test]
    fn test_basic_display_empty_has_header_only() {
        let table = BasicTable::from_records(&[]);
        assert_eq!(table.to_string().lines().count(), 1);
    }
}
