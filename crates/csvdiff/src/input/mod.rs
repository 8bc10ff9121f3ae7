//! Input parsing and data source handling.

mod parser;
mod separator;
mod source;

pub use parser::{DEFAULT_MAX_ROWS, Parser, ParserConfig, check_input_file};
pub use separator::{CANDIDATES, Detection, detect_in_sample, detect_separator, parse_separator};
pub use source::{DataTable, SourceInfo};
