//! Runtime record types in the style of Ruby's `Struct`.
//!
//! A [`RecordType`] is an ordered list of field names fixed at definition
//! time. Its records hold one [`Value`] per field, addressable by position
//! (negative positions count from the end) or by name.
//!
//! ```
//! use record_factory::{values, RecordType};
//!
//! let customer = RecordType::new(["name", "address", "zip"]).unwrap();
//! let alex = customer.construct(values!["Alex", "Some street", 5555]).unwrap();
//!
//! assert_eq!(alex.get(0).unwrap().as_str(), Some("Alex"));
//! assert_eq!(alex.get(-1).unwrap().as_i64(), Some(5555));
//! assert_eq!(
//!     alex.to_string(),
//!     r#"#<factory  name="Alex", address="Some street", zip=5555>"#
//! );
//! ```

pub mod digest;
pub mod error;
pub mod factory;
pub mod inspect;
pub mod record;
pub mod types;
pub mod value;

pub use error::{ErrorKind, RecordError};
pub use factory::{Factory, FactoryConfig};
pub use record::{Record, RecordType};
pub use types::{Accessor, AsKey, Key, Pairs, Values};
pub use value::{Number, Value, ValueMap};
