/// A parser for one block type. `None` means the block is absent (or never
/// closed), which callers treat as a default, never as an error.
pub trait BlockParser {
    type Output;

    fn parse(&self, text: &str) -> Option<Self::Output>;
}
