pub mod brands;
pub mod code;
pub mod error;
pub mod parse;
pub mod table;
pub mod transform;

pub use brands::{clean_name, detect_brand, remove_brand, BrandMatcher, KNOWN_BRANDS};
pub use code::{generate_code, GENERATED_CODE_PREFIX};
pub use error::IngestError;
pub use parse::{lookup, parse_boolean, parse_number_br, FieldAliases};
pub use table::{parse_table, read_table, RawRecord};
pub use transform::{transform_row, transform_rows, TransformOutcome};
