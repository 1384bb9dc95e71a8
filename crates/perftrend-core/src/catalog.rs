//! Fixed table of performance tests and their display metadata.
//!
//! The catalog is static configuration: charts iterate it in order, and the
//! aggregator uses its size to decide whether a commit has a complete frame.

/// Test identifier as written by the measuring harness.
pub type TestId = u32;

/// RGB triple used for a test's bars and lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: TestId,
    /// Full display name, e.g. `Test 1: Arithmetic (10K)`.
    pub name: &'static str,
    pub color: Rgb,
}

impl CatalogEntry {
    pub const fn new(id: TestId, name: &'static str, color: Rgb) -> Self {
        Self { id, name, color }
    }

    /// Name with the `Test N:` category prefix stripped.
    pub fn short_name(&self) -> &'static str {
        match self.name.split_once(':') {
            Some((_, rest)) => rest.trim(),
            None => self.name.trim(),
        }
    }

    /// Short name with the parenthesised size inlined: `Arithmetic 10K`.
    pub fn flattened_name(&self) -> String {
        self.short_name().replace(" (", " ").replace(')', "")
    }

    /// First word of the short name, lower-cased. Used in output file stems.
    pub fn file_word(&self) -> String {
        self.short_name()
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TestCatalog {
    entries: &'static [CatalogEntry],
}

impl TestCatalog {
    pub const fn new(entries: &'static [CatalogEntry]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [CatalogEntry] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: TestId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn get(&self, id: TestId) -> Option<&'static CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = TestId> + '_ {
        self.entries.iter().map(|e| e.id)
    }
}

static REFERENCE_ENTRIES: [CatalogEntry; 5] = [
    CatalogEntry::new(1, "Test 1: Arithmetic (10K)", Rgb(0x4a, 0x9e, 0xff)),
    CatalogEntry::new(2, "Test 2: Multiplication (5K)", Rgb(0x2e, 0xcc, 0x71)),
    CatalogEntry::new(3, "Test 3: Division (3K)", Rgb(0xe7, 0x4c, 0x3c)),
    CatalogEntry::new(4, "Test 4: Bit Ops (8K)", Rgb(0xf3, 0x9c, 0x12)),
    CatalogEntry::new(5, "Test 5: Loops (10K)", Rgb(0x9b, 0x59, 0xb6)),
];

/// The five emulator micro-benchmarks charted by default.
pub static REFERENCE_CATALOG: TestCatalog = TestCatalog::new(&REFERENCE_ENTRIES);
