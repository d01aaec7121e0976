pub mod field;
pub mod measurement;
pub mod record;
pub mod validation;
