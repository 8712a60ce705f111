//! Textual form of expressions: parsing, printing and pretty-printing.

pub mod parser;
pub mod pretty;
pub mod printer;

pub use parser::{is_symbol_char, parse, parse_many};
pub use pretty::{PrettyExpression, Style};
pub use printer::print;
