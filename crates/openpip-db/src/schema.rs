//! Row types for the `protein` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Table Names
// =============================================================================

pub const TABLE_PROTEINS: &str = "protein";

// =============================================================================
// Column Limits
// =============================================================================

pub const GENE_NAME_MAX_LEN: usize = 100;
pub const PROTEIN_NAME_MAX_LEN: usize = 200;
pub const UNIPROT_ID_MAX_LEN: usize = 50;
pub const ENSEMBL_ID_MAX_LEN: usize = 100;
pub const ENTREZ_ID_MAX_LEN: usize = 100;

// =============================================================================
// Protein Schema
// =============================================================================

/// Protein record as stored, and as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Protein {
    pub id: i64,
    /// Gene symbol, e.g. TP53.
    pub gene_name: String,
    pub protein_name: String,
    /// UniProt accession; unique across the table.
    pub uniprot_id: String,
    pub ensembl_id: String,
    pub entrez_id: String,
    pub description: String,
    /// Amino acid sequence, stored verbatim.
    pub sequence: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Display for Protein {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.gene_name, self.uniprot_id)
    }
}

/// Client-controlled columns of a new row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProtein {
    pub gene_name: String,
    pub protein_name: String,
    pub uniprot_id: String,
    pub ensembl_id: String,
    pub entrez_id: String,
    pub description: String,
    pub sequence: String,
}

impl NewProtein {
    pub fn new(gene_name: impl Into<String>, uniprot_id: impl Into<String>) -> Self {
        Self {
            gene_name: gene_name.into(),
            uniprot_id: uniprot_id.into(),
            ..Self::default()
        }
    }
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProteinChanges {
    pub gene_name: Option<String>,
    pub protein_name: Option<String>,
    pub uniprot_id: Option<String>,
    pub ensembl_id: Option<String>,
    pub entrez_id: Option<String>,
    pub description: Option<String>,
    pub sequence: Option<String>,
}

impl ProteinChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<NewProtein> for ProteinChanges {
    fn from(p: NewProtein) -> Self {
        Self {
            gene_name: Some(p.gene_name),
            protein_name: Some(p.protein_name),
            uniprot_id: Some(p.uniprot_id),
            ensembl_id: Some(p.ensembl_id),
            entrez_id: Some(p.entrez_id),
            description: Some(p.description),
            sequence: Some(p.sequence),
        }
    }
}
