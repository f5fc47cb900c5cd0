//! Screen controllers
//!
//! Controllers hold per-screen state and talk to the services through
//! [`EntitySource`](crate::services::EntitySource). They never render; user
//! feedback is recorded as [`Notice`]s for the UI to display.

pub mod form;
pub mod list_view;

pub use form::{FormController, FormDraft};
pub use list_view::{ListViewController, LoadState};

use crate::{
    error::AppError,
    models::{employee::Employee, equipment::Equipment},
};

const ERROR_TITLE: &str = "Erro";
const SUCCESS_TITLE: &str = "Sucesso";

/// A user-facing alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            title: SUCCESS_TITLE.to_string(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.title == ERROR_TITLE
    }
}

/// Display nouns used in notices
pub trait Labels {
    /// Capitalized singular, e.g. "Equipamento"
    const NOUN: &'static str;
    const PLURAL: &'static str;
}

impl Labels for Equipment {
    const NOUN: &'static str = "Equipamento";
    const PLURAL: &'static str = "equipamentos";
}

impl Labels for Employee {
    const NOUN: &'static str = "Colaborador";
    const PLURAL: &'static str = "colaboradores";
}

/// Alert for a failed action. Domain errors carry their own message; backend
/// failures get the generic `fallback`.
pub(crate) fn failure_notice(error: &AppError, fallback: String) -> Notice {
    match error {
        AppError::Validation(_) => {
            Notice::error("Por favor, preencha todos os campos obrigatórios.")
        }
        AppError::DuplicateKey(_) | AppError::NotFound(_) => Notice::error(error.user_message()),
        _ => Notice::error(fallback),
    }
}
