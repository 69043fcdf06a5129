//! Author model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::non_blank;
use crate::error::{AppError, AppResult};

/// Author record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i64,
    pub name: String,
    /// Free-form date string, stored as submitted
    pub birth_date: Option<String>,
    pub date_of_death: Option<String>,
}

/// Raw `add_author` form submission
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AuthorForm {
    pub name: Option<String>,
    pub birth_date: Option<String>,
    pub date_of_death: Option<String>,
}

/// Create author request
#[derive(Debug, Clone, Validate)]
pub struct CreateAuthor {
    #[validate(length(min = 1, max = 120, message = "Author name must be 1 to 120 characters"))]
    pub name: String,
    #[validate(length(max = 10, message = "Birth date must be at most 10 characters"))]
    pub birth_date: Option<String>,
    #[validate(length(max = 10, message = "Date of death must be at most 10 characters"))]
    pub date_of_death: Option<String>,
}

impl CreateAuthor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            birth_date: None,
            date_of_death: None,
        }
    }

    pub fn born(mut self, birth_date: impl Into<String>) -> Self {
        self.birth_date = Some(birth_date.into());
        self
    }

    pub fn died(mut self, date_of_death: impl Into<String>) -> Self {
        self.date_of_death = Some(date_of_death.into());
        self
    }
}

impl TryFrom<AuthorForm> for CreateAuthor {
    type Error = AppError;

    fn try_from(form: AuthorForm) -> AppResult<Self> {
        let name = non_blank(form.name)
            .ok_or_else(|| AppError::Validation("Author name is required".to_string()))?;

        Ok(Self {
            name,
            birth_date: non_blank(form.birth_date),
            date_of_death: non_blank(form.date_of_death),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_requires_name() {
        let err = CreateAuthor::try_from(AuthorForm::default()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let form = AuthorForm {
            name: Some("  ".into()),
            ..Default::default()
        };
        assert!(CreateAuthor::try_from(form).is_err());
    }

    #[test]
    fn test_form_blank_dates_are_absent() {
        let form = AuthorForm {
            name: Some("Ursula K. Le Guin".into()),
            birth_date: Some("1929-10-21".into()),
            date_of_death: Some("".into()),
        };
        let author = CreateAuthor::try_from(form).unwrap();
        assert_eq!(author.name, "Ursula K. Le Guin");
        assert_eq!(author.birth_date.as_deref(), Some("1929-10-21"));
        assert_eq!(author.date_of_death, None);
    }

    #[test]
    fn test_column_widths() {
        assert!(CreateAuthor::new("Jane Doe").born("c. 1850").validate().is_ok());
        assert!(CreateAuthor::new("x".repeat(121)).validate().is_err());
        assert!(CreateAuthor::new("Jane Doe").died("the 12th of May").validate().is_err());
    }
}
