mod read_op;
pub mod record;
pub mod record_type;
mod write_op;

pub use record::Record;
pub use record_type::RecordType;

#[cfg(test)]
mod tests;
