use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::standardize::{
    columns_to_drop, normalize_column_name, normalize_role_cell, resolve, ResolvedAddress,
    ADDRESS_COLUMN, ATTENDANT_COLUMN, SPECIFIC_ADDRESS_COLUMN,
};
use crate::types::{Cell, Table};

/// What a transform run changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformSummary {
    /// Records processed
    pub rows: usize,

    /// Whether an ADDRESS column was present and standardized
    pub address_standardized: bool,

    /// Address cells resolved to a canonical area
    pub resolved: usize,

    /// Address cells with unrecognized text
    pub transient: usize,

    /// Address cells with no text
    pub missing: usize,

    /// Whether an ATTENDANT column was present and normalized
    pub attendant_normalized: bool,

    /// Attendant values replaced by an official code
    pub roles_substituted: usize,

    /// Columns removed from the output
    pub dropped_columns: Vec<String>,
}

impl TransformSummary {
    /// One-line description of the standards applied
    pub fn headline(&self) -> String {
        let mut parts = Vec::new();
        if self.address_standardized {
            parts.push(format!(
                "addresses standardized ({} matched, {} transient, {} missing)",
                self.resolved, self.transient, self.missing
            ));
        }
        if self.attendant_normalized {
            parts.push(format!("RHM/MD updated ({} values)", self.roles_substituted));
        }
        if !self.dropped_columns.is_empty() {
            parts.push(format!("{} columns removed", self.dropped_columns.len()));
        }
        if parts.is_empty() {
            "No standards applied".to_string()
        } else {
            format!("Standards applied: {}", parts.join(", "))
        }
    }
}

/// A cleaned table with its summary
#[derive(Debug, Clone)]
pub struct Transformed {
    pub table: Table,
    pub summary: TransformSummary,
}

/// Clean a parsed table.
///
/// Headers are normalized, every ADDRESS column is overwritten with resolved
/// areas, every ATTENDANT column is normalized, and drop-list columns are
/// removed. Steps whose column is absent are skipped.
pub fn transform(mut table: Table) -> Transformed {
    let mut summary = TransformSummary {
        rows: table.row_count(),
        ..TransformSummary::default()
    };

    table.rename_columns(normalize_column_name);

    let address_columns = matching_columns(&table, ADDRESS_COLUMN);
    if address_columns.is_empty() {
        debug!("No {} column; address standardization skipped", ADDRESS_COLUMN);
    }
    for address_idx in address_columns {
        standardize_addresses(&mut table, address_idx, &mut summary);
    }

    let attendant_columns = matching_columns(&table, ATTENDANT_COLUMN);
    if attendant_columns.is_empty() {
        debug!("No {} column; attendant normalization skipped", ATTENDANT_COLUMN);
    }
    for attendant_idx in attendant_columns {
        summary.attendant_normalized = true;
        for cell in table.column_cells_mut(attendant_idx) {
            let normalized = normalize_role_cell(cell);
            if is_substitution(cell, &normalized) {
                summary.roles_substituted += 1;
            }
            *cell = normalized;
        }
    }

    let drops = columns_to_drop(table.columns());
    summary.dropped_columns = drops
        .iter()
        .map(|&idx| table.columns()[idx].clone())
        .collect();
    table.drop_columns(&drops);

    Transformed { table, summary }
}

/// Every column carrying `name` after header normalization
fn matching_columns(table: &Table, name: &str) -> Vec<usize> {
    let indices = table.column_indices(name);
    if indices.len() > 1 {
        warn!(
            "{} columns normalize to {}; all of them are processed",
            indices.len(),
            name
        );
    }
    indices
}

fn standardize_addresses(table: &mut Table, address_idx: usize, summary: &mut TransformSummary) {
    summary.address_standardized = true;
    let specific_idx = table.column_index(SPECIFIC_ADDRESS_COLUMN);

    let resolved: Vec<ResolvedAddress> = table
        .rows()
        .iter()
        .map(|row| {
            let address = row[address_idx].as_text();
            let specific = specific_idx.and_then(|idx| row[idx].as_text());
            resolve(address.as_deref(), specific.as_deref())
        })
        .collect();

    for (cell, outcome) in table.column_cells_mut(address_idx).zip(resolved) {
        match outcome {
            ResolvedAddress::Area(_) => summary.resolved += 1,
            ResolvedAddress::Transient => summary.transient += 1,
            ResolvedAddress::Missing => summary.missing += 1,
        }
        *cell = Cell::Text(outcome.to_string());
    }
}

/// Whether normalization did more than uppercase the value
fn is_substitution(before: &Cell, after: &Cell) -> bool {
    match (before.as_text(), after) {
        (Some(text), Cell::Text(normalized)) => text.to_uppercase() != *normalized,
        _ => false,
    }
}
