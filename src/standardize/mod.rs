pub mod address;
pub mod columns;
pub mod roles;

pub use address::{resolve, ResolvedAddress};
pub use columns::{
    columns_to_drop, normalize_column_name, ADDRESS_COLUMN, ATTENDANT_COLUMN,
    SPECIFIC_ADDRESS_COLUMN,
};
pub use roles::normalize_role_cell;
