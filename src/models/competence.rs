use serde::Deserialize;
use sqlx::FromRow;

pub const MAX_NOM_LEN: usize = 200;
pub const MAX_NIVEAU_LEN: usize = 50;
pub const MAX_SEMESTRE_LEN: usize = 10;

/// Database competence model
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Competence {
    pub id: i64,
    pub nom: String,
    pub niveau: String,
    pub semestre: String,
}

/// Form submitted to `POST /ajouter_competence`. Every field may be absent.
#[derive(Debug, Default, Deserialize)]
pub struct CompetenceForm {
    pub nom: Option<String>,
    pub niveau: Option<String>,
    pub semestre: Option<String>,
}

/// A competence that passed validation and is ready to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompetence {
    pub nom: String,
    pub niveau: String,
    pub semestre: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CompetenceFormError {
    MissingField,
    TooLong { field: &'static str, max: usize },
}

impl CompetenceForm {
    pub fn validate(self) -> Result<NewCompetence, CompetenceFormError> {
        let (Some(nom), Some(niveau), Some(semestre)) = (
            self.nom.filter(|s| !s.is_empty()),
            self.niveau.filter(|s| !s.is_empty()),
            self.semestre.filter(|s| !s.is_empty()),
        ) else {
            return Err(CompetenceFormError::MissingField);
        };

        for (field, value, max) in [
            ("nom", &nom, MAX_NOM_LEN),
            ("niveau", &niveau, MAX_NIVEAU_LEN),
            ("semestre", &semestre, MAX_SEMESTRE_LEN),
        ] {
            if value.chars().count() > max {
                return Err(CompetenceFormError::TooLong { field, max });
            }
        }

        Ok(NewCompetence {
            nom,
            niveau,
            semestre,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(nom: Option<&str>, niveau: Option<&str>, semestre: Option<&str>) -> CompetenceForm {
        CompetenceForm {
            nom: nom.map(String::from),
            niveau: niveau.map(String::from),
            semestre: semestre.map(String::from),
        }
    }

    #[test]
    fn complete_form_is_accepted() {
        let competence = form(Some("Go"), Some("Intermediate"), Some("S1"))
            .validate()
            .unwrap();

        assert_eq!(competence.nom, "Go");
        assert_eq!(competence.niveau, "Intermediate");
        assert_eq!(competence.semestre, "S1");
    }

    #[test]
    fn missing_or_empty_fields_are_rejected() {
        let cases = [
            form(None, Some("Intermediate"), Some("S1")),
            form(Some("Go"), Some(""), Some("S1")),
            form(Some("Go"), Some("Intermediate"), None),
            form(None, None, None),
        ];

        for case in cases {
            assert_eq!(case.validate(), Err(CompetenceFormError::MissingField));
        }
    }

    #[test]
    fn oversized_semestre_is_rejected() {
        let result = form(Some("Go"), Some("Intermediate"), Some("Semestre 1 bis")).validate();
        assert_eq!(
            result,
            Err(CompetenceFormError::TooLong {
                field: "semestre",
                max: MAX_SEMESTRE_LEN
            })
        );
    }

    #[test]
    fn length_is_counted_in_characters() {
        let nom = "é".repeat(MAX_NOM_LEN);
        assert!(form(Some(&nom), Some("Avancé"), Some("S2")).validate().is_ok());
    }
}
