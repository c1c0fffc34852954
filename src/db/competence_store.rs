use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::competence::{Competence, NewCompetence},
};

/// Competence store for database operations
#[derive(Clone)]
pub struct CompetenceStore {
    pool: DbPool,
}

impl CompetenceStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get every competence, oldest first
    pub async fn get_all(&self) -> Result<Vec<Competence>> {
        let competences = sqlx::query_as::<_, Competence>(
            "SELECT id, nom, niveau, semestre FROM competences ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(competences)
    }

    /// Insert a competence and return the stored row
    pub async fn create(&self, competence: &NewCompetence) -> Result<Competence> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("INSERT INTO competences (nom, niveau, semestre) VALUES (?, ?, ?)")
            .bind(&competence.nom)
            .bind(&competence.niveau)
            .bind(&competence.semestre)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Competence {
            id: result.last_insert_rowid(),
            nom: competence.nom.clone(),
            niveau: competence.niveau.clone(),
            semestre: competence.semestre.clone(),
        })
    }

    /// Delete a competence by ID
    ///
    /// Fails with `AppError::NotFound` when no row has this id, including
    /// when a concurrent request deleted it first.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM competences WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("competence {id}")));
        }

        tx.commit().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_pool;

    fn go() -> NewCompetence {
        NewCompetence {
            nom: "Go".into(),
            niveau: "Intermediate".into(),
            semestre: "S1".into(),
        }
    }

    #[tokio::test]
    async fn create_then_list() {
        let store = CompetenceStore::new(init_memory_pool().await.unwrap());

        let created = store.create(&go()).await.unwrap();
        let all = store.get_all().await.unwrap();

        assert_eq!(all, vec![created]);
    }

    #[tokio::test]
    async fn delete_removes_only_the_target_row() {
        let store = CompetenceStore::new(init_memory_pool().await.unwrap());
        let first = store.create(&go()).await.unwrap();
        let second = store
            .create(&NewCompetence {
                nom: "Rust".into(),
                niveau: "Débutant".into(),
                semestre: "S2".into(),
            })
            .await
            .unwrap();

        store.delete(first.id).await.unwrap();

        assert_eq!(store.get_all().await.unwrap(), vec![second]);
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let store = CompetenceStore::new(init_memory_pool().await.unwrap());
        let kept = store.create(&go()).await.unwrap();

        let err = store.delete(999).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(store.get_all().await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn closed_pool_surfaces_storage_error() {
        let pool = init_memory_pool().await.unwrap();
        let store = CompetenceStore::new(pool.clone());
        pool.close().await;

        let err = store.create(&go()).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }
}
