use crate::{
    db::competence_store::CompetenceStore,
    error::{AppError, Result},
    models::{
        competence::{Competence, CompetenceForm, CompetenceFormError},
        flash::{Flash, Outcome},
    },
    routes::DASHBOARD_SERVICES,
};

const MISSING_FIELDS: &str = "Tous les champs sont requis.";
const ADDED: &str = "Compétence ajoutée.";
const ADD_FAILED: &str = "Erreur lors de l'ajout de compétence.";
const DELETED: &str = "Compétence supprimée.";
const DELETE_FAILED: &str = "Erreur lors de la suppression de compétence.";

#[derive(Clone)]
pub struct CompetenceService {
    store: CompetenceStore,
}

impl CompetenceService {
    pub fn new(store: CompetenceStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Competence>> {
        self.store.get_all().await
    }

    pub async fn add(&self, form: CompetenceForm) -> Outcome {
        let done = |flash| Outcome::new(flash, DASHBOARD_SERVICES);

        let competence = match form.validate() {
            Ok(competence) => competence,
            Err(CompetenceFormError::MissingField) => return done(Flash::warning(MISSING_FIELDS)),
            Err(CompetenceFormError::TooLong { field, max }) => {
                return done(Flash::warning(format!(
                    "Le champ {field} ne doit pas dépasser {max} caractères."
                )));
            }
        };

        match self.store.create(&competence).await {
            Ok(created) => {
                tracing::info!(competence_id = created.id, nom = %created.nom, "Competence added");
                done(Flash::success(ADDED))
            }
            Err(e) => {
                tracing::error!(error = %e, "Error while adding competence");
                done(Flash::danger(ADD_FAILED))
            }
        }
    }

    /// Delete a competence. An unknown id is an error, storage failures are
    /// reported in the outcome.
    pub async fn delete(&self, id: i64) -> Result<Outcome> {
        match self.store.delete(id).await {
            Ok(()) => {
                tracing::info!(competence_id = id, "Competence deleted");
                Ok(Outcome::new(Flash::success(DELETED), DASHBOARD_SERVICES))
            }
            Err(AppError::NotFound(what)) => Err(AppError::NotFound(what)),
            Err(e) => {
                tracing::error!(error = %e, competence_id = id, "Error while deleting competence");
                Ok(Outcome::new(Flash::danger(DELETE_FAILED), DASHBOARD_SERVICES))
            }
        }
    }
}
