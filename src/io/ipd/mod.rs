mod reader;

pub use reader::{NameLookup, ParsedInteractions, parse, read};
