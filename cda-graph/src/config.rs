/// Options for a resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveConfig {
    /// Consult the asset and content type id oracles for links whose target
    /// is absent from the payload. When off, such links resolve to nothing.
    pub synthesize_placeholders: bool,
    /// Parse `RichText` fields into node trees. When off they stay raw.
    pub resolve_rich_text: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            synthesize_placeholders: true,
            resolve_rich_text: true,
        }
    }
}
