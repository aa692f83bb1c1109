//! List-query model: search terms, ordering and slicing.

/// Columns scanned by `search`, OR-ed together per term.
pub const SEARCH_COLUMNS: [&str; 4] = ["gene_name", "protein_name", "uniprot_id", "description"];

/// Columns a caller may order by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    GeneName,
    CreatedAt,
}

impl SortField {
    pub fn column(self) -> &'static str {
        match self {
            SortField::GeneName => "gene_name",
            SortField::CreatedAt => "created_at",
        }
    }
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gene_name" => Ok(SortField::GeneName),
            "created_at" => Ok(SortField::CreatedAt),
            _ => Err(format!("Unknown ordering field: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub descending: bool,
}

impl SortKey {
    pub const fn asc(field: SortField) -> Self {
        Self { field, descending: false }
    }

    pub const fn desc(field: SortField) -> Self {
        Self { field, descending: true }
    }
}

/// Default ordering of the table.
pub const DEFAULT_ORDERING: [SortKey; 1] = [SortKey::asc(SortField::GeneName)];

/// Parse an `ordering` parameter such as `-gene_name` or `created_at,-gene_name`.
///
/// Unknown fields are dropped. If nothing usable is left the default
/// ordering applies.
pub fn parse_ordering(raw: &str) -> Vec<SortKey> {
    let keys: Vec<SortKey> = raw
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .filter_map(|term| {
            let (descending, name) = match term.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, term),
            };
            match name.parse::<SortField>() {
                Ok(field) => Some(SortKey { field, descending }),
                Err(e) => {
                    tracing::debug!(term, error = %e, "Ignoring ordering term");
                    None
                }
            }
        })
        .collect();

    if keys.is_empty() {
        DEFAULT_ORDERING.to_vec()
    } else {
        keys
    }
}

/// Split a `search` parameter into terms on whitespace and commas.
pub fn split_search_terms(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Filter, order and window for `ProteinRepository::list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinQuery {
    /// Every term must match at least one of `SEARCH_COLUMNS`.
    pub search: Vec<String>,
    pub ordering: Vec<SortKey>,
    pub limit: Option<u64>,
    pub offset: u64,
}

impl Default for ProteinQuery {
    fn default() -> Self {
        Self {
            search: Vec::new(),
            ordering: DEFAULT_ORDERING.to_vec(),
            limit: None,
            offset: 0,
        }
    }
}

impl ProteinQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, raw: &str) -> Self {
        self.search = split_search_terms(raw);
        self
    }

    pub fn ordering(mut self, raw: &str) -> Self {
        self.ordering = parse_ordering(raw);
        self
    }

    pub fn page(mut self, offset: u64, limit: u64) -> Self {
        self.offset = offset;
        self.limit = Some(limit);
        self
    }
}

/// Escape `LIKE` wildcards so a term matches literally.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
