/// Limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest allowed nesting of arrays and objects. Scalars do not count, so
    /// `0` only admits a bare scalar document.
    pub max_depth: usize,
}

impl ParseOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 512;

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Output layout for the serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    pub pretty: bool,
    /// Spaces added per nesting level in pretty mode
    pub indent: usize,
}

impl SerializeOptions {
    pub const DEFAULT_INDENT: usize = 2;

    pub fn compact() -> Self {
        Self {
            pretty: false,
            indent: Self::DEFAULT_INDENT,
        }
    }

    pub fn pretty(indent: usize) -> Self {
        Self {
            pretty: true,
            indent,
        }
    }
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self::compact()
    }
}
