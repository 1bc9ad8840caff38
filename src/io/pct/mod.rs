mod reader;

pub use reader::{COMPONENT_MARKER, ParsedComponents, parse, read};
