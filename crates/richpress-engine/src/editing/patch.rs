/// Result of applying a command to the document.
pub struct Patch {
    /// Byte ranges of the buffer written by this edit.
    pub changed: Vec<std::ops::Range<usize>>,
    /// Selection after the edit, placed deterministically per command.
    pub new_selection: std::ops::Range<usize>,
    /// Document version after the edit.
    pub version: u64,
}
