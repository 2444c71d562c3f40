use crate::types::Cell;

/// Whole-value substitutions applied after uppercasing
const ROLE_SUBSTITUTIONS: &[(&str, &str)] = &[("MIDWIFE", "RHM"), ("PHYSICIAN", "MD")];

/// Uppercase an attendant value and map known roles to their official codes
pub fn normalize_role(value: &str) -> String {
    let upper = value.to_uppercase();
    ROLE_SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == upper)
        .map(|(_, to)| to.to_string())
        .unwrap_or(upper)
}

/// Cell-level role normalization. Empty cells stay empty.
pub fn normalize_role_cell(cell: &Cell) -> Cell {
    match cell.as_text() {
        Some(text) => Cell::Text(normalize_role(&text)),
        None => Cell::Empty,
    }
}
