//! Protein repository.
//!
//! Provides CRUD operations and filtered listing for the `protein` table.

use crate::database::Database;
use crate::error::{DbError, Result};
use crate::query::{like_pattern, ProteinQuery, SEARCH_COLUMNS};
use crate::schema::{NewProtein, Protein, ProteinChanges, TABLE_PROTEINS};
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};
use std::sync::Arc;

const COLUMNS: &str = "id, gene_name, protein_name, uniprot_id, ensembl_id, entrez_id, \
                       description, sequence, created_at, updated_at";

/// Repository for protein operations.
#[derive(Clone)]
pub struct ProteinRepository {
    db: Arc<Database>,
}

impl ProteinRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a new protein. Fails with `DbError::Duplicate` if the
    /// `uniprot_id` is already stored.
    pub async fn insert(&self, new: &NewProtein) -> Result<Protein> {
        let now = Utc::now();
        let protein = sqlx::query_as::<_, Protein>(&format!(
            r#"
            INSERT INTO {TABLE_PROTEINS}
                (gene_name, protein_name, uniprot_id, ensembl_id, entrez_id,
                 description, sequence, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&new.gene_name)
        .bind(&new.protein_name)
        .bind(&new.uniprot_id)
        .bind(&new.ensembl_id)
        .bind(&new.entrez_id)
        .bind(&new.description)
        .bind(&new.sequence)
        .bind(now)
        .bind(now)
        .fetch_one(self.db.pool())
        .await?;

        tracing::info!(id = protein.id, protein = %protein, "Inserted protein");
        Ok(protein)
    }

    /// Find a protein by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Protein>> {
        let protein = sqlx::query_as::<_, Protein>(&format!(
            "SELECT {COLUMNS} FROM {TABLE_PROTEINS} WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(protein)
    }

    /// Like `find_by_id`, but a miss is an error.
    pub async fn get(&self, id: i64) -> Result<Protein> {
        self.find_by_id(id).await?.ok_or(DbError::NotFound(id))
    }

    /// Find a protein by UniProt accession.
    pub async fn find_by_uniprot_id(&self, uniprot_id: &str) -> Result<Option<Protein>> {
        let protein = sqlx::query_as::<_, Protein>(&format!(
            "SELECT {COLUMNS} FROM {TABLE_PROTEINS} WHERE uniprot_id = ?"
        ))
        .bind(uniprot_id)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(protein)
    }

    /// List proteins matching the query's search terms, in the query's order.
    pub async fn list(&self, query: &ProteinQuery) -> Result<Vec<Protein>> {
        let mut qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM {TABLE_PROTEINS}"));
        push_search(&mut qb, &query.search);

        qb.push(" ORDER BY ");
        for key in &query.ordering {
            qb.push(key.field.column());
            qb.push(if key.descending { " DESC, " } else { " ASC, " });
        }
        qb.push("id ASC");

        match query.limit {
            Some(limit) => {
                qb.push(" LIMIT ").push_bind(limit as i64);
                qb.push(" OFFSET ").push_bind(query.offset as i64);
            }
            None if query.offset > 0 => {
                qb.push(" LIMIT -1 OFFSET ").push_bind(query.offset as i64);
            }
            None => {}
        }

        let proteins = qb
            .build_query_as::<Protein>()
            .fetch_all(self.db.pool())
            .await?;

        tracing::debug!(
            terms = ?query.search,
            returned = proteins.len(),
            "Listed proteins"
        );
        Ok(proteins)
    }

    /// Count proteins matching the query's search terms. Ordering and
    /// window are ignored.
    pub async fn count(&self, query: &ProteinQuery) -> Result<u64> {
        let mut qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new(format!("SELECT COUNT(*) FROM {TABLE_PROTEINS}"));
        push_search(&mut qb, &query.search);

        let count = qb.build_query_scalar::<i64>().fetch_one(self.db.pool()).await?;
        Ok(count as u64)
    }

    /// Apply `changes` to the protein with `id` and refresh `updated_at`.
    /// `created_at` is never written. One statement, so concurrent callers
    /// queue on SQLite's write lock.
    pub async fn update(&self, id: i64, changes: &ProteinChanges) -> Result<Protein> {
        let updated = sqlx::query_as::<_, Protein>(&format!(
            r#"
            UPDATE {TABLE_PROTEINS} SET
                gene_name = COALESCE(?, gene_name),
                protein_name = COALESCE(?, protein_name),
                uniprot_id = COALESCE(?, uniprot_id),
                ensembl_id = COALESCE(?, ensembl_id),
                entrez_id = COALESCE(?, entrez_id),
                description = COALESCE(?, description),
                sequence = COALESCE(?, sequence),
                updated_at = ?
            WHERE id = ?
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&changes.gene_name)
        .bind(&changes.protein_name)
        .bind(&changes.uniprot_id)
        .bind(&changes.ensembl_id)
        .bind(&changes.entrez_id)
        .bind(&changes.description)
        .bind(&changes.sequence)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?
        .ok_or(DbError::NotFound(id))?;

        tracing::info!(id, protein = %updated, "Updated protein");
        Ok(updated)
    }

    /// Delete a protein by ID.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query(&format!("DELETE FROM {TABLE_PROTEINS} WHERE id = ?"))
            .bind(id)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(id));
        }
        tracing::info!(id, "Deleted protein");
        Ok(())
    }

    /// Fetch the protein with `new.uniprot_id`, inserting `new` if absent.
    /// Returns the row and whether it was created.
    pub async fn get_or_create(&self, new: &NewProtein) -> Result<(Protein, bool)> {
        if let Some(existing) = self.find_by_uniprot_id(&new.uniprot_id).await? {
            return Ok((existing, false));
        }

        match self.insert(new).await {
            Ok(protein) => Ok((protein, true)),
            // Lost a race with another writer; theirs is the row.
            Err(DbError::Duplicate(_)) => {
                let existing = self
                    .find_by_uniprot_id(&new.uniprot_id)
                    .await?
                    .ok_or_else(|| DbError::Duplicate(new.uniprot_id.clone()))?;
                Ok((existing, false))
            }
            Err(e) => Err(e),
        }
    }
}

/// Append `WHERE` clauses for the search terms: AND across terms, OR across
/// `SEARCH_COLUMNS`, substring match. SQLite `LIKE` folds ASCII case only;
/// other characters must match as stored.
fn push_search(qb: &mut QueryBuilder<'_, Sqlite>, terms: &[String]) {
    for (i, term) in terms.iter().enumerate() {
        qb.push(if i == 0 { " WHERE (" } else { " AND (" });
        let pattern = like_pattern(term);
        for (j, column) in SEARCH_COLUMNS.iter().enumerate() {
            if j > 0 {
                qb.push(" OR ");
            }
            qb.push(*column);
            qb.push(" LIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" ESCAPE '\\'");
        }
        qb.push(")");
    }
}
