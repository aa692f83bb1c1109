//! Sample data for a fresh database.

use crate::error::Result;
use crate::proteins::ProteinRepository;
use crate::query::ProteinQuery;
use crate::schema::NewProtein;

/// One entry of the built-in sample set.
#[derive(Debug, Clone, Copy)]
pub struct SampleProtein {
    pub gene_name: &'static str,
    pub protein_name: &'static str,
    pub uniprot_id: &'static str,
    pub ensembl_id: &'static str,
    pub entrez_id: &'static str,
    pub description: &'static str,
}

impl From<&SampleProtein> for NewProtein {
    fn from(s: &SampleProtein) -> Self {
        NewProtein {
            gene_name: s.gene_name.to_string(),
            protein_name: s.protein_name.to_string(),
            uniprot_id: s.uniprot_id.to_string(),
            ensembl_id: s.ensembl_id.to_string(),
            entrez_id: s.entrez_id.to_string(),
            description: s.description.to_string(),
            sequence: String::new(),
        }
    }
}

/// Well-known human genes.
pub const SAMPLE_PROTEINS: [SampleProtein; 5] = [
    SampleProtein {
        gene_name: "TP53",
        protein_name: "Cellular tumor antigen p53",
        uniprot_id: "P04637",
        ensembl_id: "ENSG00000141510",
        entrez_id: "7157",
        description: "Acts as a tumor suppressor in many tumor types",
    },
    SampleProtein {
        gene_name: "BRCA1",
        protein_name: "Breast cancer type 1 susceptibility protein",
        uniprot_id: "P38398",
        ensembl_id: "ENSG00000012048",
        entrez_id: "672",
        description: "DNA repair protein",
    },
    SampleProtein {
        gene_name: "EGFR",
        protein_name: "Epidermal growth factor receptor",
        uniprot_id: "P00533",
        ensembl_id: "ENSG00000146648",
        entrez_id: "1956",
        description: "Receptor tyrosine kinase",
    },
    SampleProtein {
        gene_name: "MYC",
        protein_name: "Myc proto-oncogene protein",
        uniprot_id: "P01106",
        ensembl_id: "ENSG00000136997",
        entrez_id: "4609",
        description: "Transcription factor",
    },
    SampleProtein {
        gene_name: "KRAS",
        protein_name: "GTPase KRas",
        uniprot_id: "P01116",
        ensembl_id: "ENSG00000133703",
        entrez_id: "3845",
        description: "GTPase in signal transduction",
    },
];

/// Outcome of a seeding run. Entries are display names, e.g. `TP53 (P04637)`.
#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    pub created: Vec<String>,
    pub existing: Vec<String>,
    pub total: u64,
}

/// Insert every sample protein whose accession is not yet stored.
/// Rows that already exist are left as they are.
pub async fn load_sample_proteins(repo: &ProteinRepository) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for sample in &SAMPLE_PROTEINS {
        let (protein, created) = repo.get_or_create(&NewProtein::from(sample)).await?;
        if created {
            tracing::info!(protein = %protein, "Created sample protein");
            report.created.push(protein.to_string());
        } else {
            tracing::info!(protein = %protein, "Sample protein already exists");
            report.existing.push(protein.to_string());
        }
    }

    report.total = repo.count(&ProteinQuery::new()).await?;
    Ok(report)
}
