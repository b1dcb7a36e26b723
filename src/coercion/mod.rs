mod fields;
mod row;
mod session;

pub use row::coerce_row;
