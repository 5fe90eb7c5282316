//! Splice log over an immutable source buffer.
//!
//! Passes never mutate the source while walking it. Every edit is recorded
//! as a `(start, end, text)` splice against the original offsets and the
//! whole log is applied once at the end, so offsets taken from the AST stay
//! valid for the entire walk.

/// A single text replacement against the original source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    pub start: u32,
    pub end: u32,
    pub text: String,
    order: usize,
}

impl Splice {
    /// Zero-width splices insert text without removing anything.
    #[inline]
    pub fn is_insert(&self) -> bool {
        self.start == self.end
    }

    fn overlaps(&self, start: u32, end: u32) -> bool {
        match (self.is_insert(), start == end) {
            (true, true) => false,
            (true, false) => start < self.start && self.start < end,
            (false, true) => self.start < start && start < self.end,
            (false, false) => self.start < end && start < self.end,
        }
    }
}

/// Ordered, non-overlapping splices recorded against `source`.
///
/// Zero-width inserts at the same offset are allowed and keep the order in
/// which they were recorded. Any other overlap is a bug in the caller and
/// panics.
#[derive(Debug, Clone)]
pub struct Codes<'s> {
    source: &'s str,
    splices: Vec<Splice>,
}

impl<'s> Codes<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            splices: Vec::new(),
        }
    }

    /// The original, unspliced source.
    #[inline]
    pub fn source(&self) -> &'s str {
        self.source
    }

    /// Source text of `start..end` in the original buffer.
    #[inline]
    pub fn slice(&self, start: u32, end: u32) -> &'s str {
        &self.source[start as usize..end as usize]
    }

    /// Record a replacement of `start..end` with `text`.
    ///
    /// # Panics
    ///
    /// When the range is out of bounds or intersects a splice recorded
    /// earlier.
    pub fn replace_range(&mut self, start: u32, end: u32, text: impl Into<String>) {
        assert!(
            start <= end && end as usize <= self.source.len(),
            "splice {}..{} is outside the source (len {})",
            start,
            end,
            self.source.len()
        );
        if let Some(existing) = self.splices.iter().find(|s| s.overlaps(start, end)) {
            panic!(
                "splice {}..{} overlaps splice {}..{}",
                start, end, existing.start, existing.end
            );
        }
        let order = self.splices.len();
        self.splices.push(Splice {
            start,
            end,
            text: text.into(),
            order,
        });
    }

    /// Record a pure insertion at `offset`.
    #[inline]
    pub fn insert(&mut self, offset: u32, text: impl Into<String>) {
        self.replace_range(offset, offset, text);
    }

    /// Record a deletion of `start..end`.
    #[inline]
    pub fn remove(&mut self, start: u32, end: u32) {
        self.replace_range(start, end, String::new());
    }

    /// Remove and return every splice lying within `start..end` that a
    /// replacement of that range would overlap.
    ///
    /// Inserts sitting exactly on either boundary stay in the log. Used when
    /// a range is about to be moved elsewhere: the caller renders the taken
    /// splices with [`Codes::render_range`] and records the result as a
    /// single replacement.
    pub fn take_within(&mut self, start: u32, end: u32) -> Vec<Splice> {
        let (taken, kept) = std::mem::take(&mut self.splices)
            .into_iter()
            .partition(|s| {
                start <= s.start
                    && s.end <= end
                    && !(s.is_insert() && (s.start == start || s.start == end))
            });
        self.splices = kept;
        taken
    }

    /// Render `start..end` of the original source with `splices` applied.
    ///
    /// Splices outside the range are ignored.
    pub fn render_range(&self, start: u32, end: u32, splices: &[Splice]) -> String {
        let inside = splices
            .iter()
            .filter(|s| start <= s.start && s.end <= end);
        render(self.source, start as usize, end as usize, inside)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.splices.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.splices.len()
    }

    /// Apply every splice in one forward pass and return the new text.
    pub fn apply(&self) -> String {
        render(self.source, 0, self.source.len(), self.splices.iter())
    }
}

fn render<'a>(
    source: &str,
    from: usize,
    to: usize,
    splices: impl Iterator<Item = &'a Splice>,
) -> String {
    let mut sorted: Vec<&Splice> = splices.collect();
    // Inserts sort before a replacement starting at the same offset.
    sorted.sort_by_key(|s| (s.start, !s.is_insert(), s.order));

    let added: usize = sorted.iter().map(|s| s.text.len()).sum();
    let mut out = String::with_capacity(to - from + added);
    let mut cursor = from;
    for splice in sorted {
        let start = splice.start as usize;
        if start > cursor {
            out.push_str(&source[cursor..start]);
        }
        out.push_str(&splice.text);
        cursor = cursor.max(splice.end as usize);
    }
    if cursor < to {
        out.push_str(&source[cursor..to]);
    }
    out
}
