//! Create/edit modal state

use std::{marker::PhantomData, sync::Arc};

use validator::Validate;

use super::{failure_notice, list_view::ListViewController, Labels, Notice};
use crate::{
    error::{AppError, AppResult},
    models::search::Searchable,
    repository::Entity,
    services::EntitySource,
};

/// Draft held while the modal is open
#[derive(Debug, Clone, PartialEq)]
pub enum FormDraft<C, U> {
    Create(C),
    Edit { id: String, data: U },
}

pub struct FormController<E, S: EntitySource<E>>
where
    E: Entity,
{
    source: Arc<S>,
    draft: Option<FormDraft<S::Create, S::Update>>,
    notices: Vec<Notice>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, S> FormController<E, S>
where
    E: Entity + Searchable + Labels,
    S: EntitySource<E>,
{
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            draft: None,
            notices: Vec::new(),
            _entity: PhantomData,
        }
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&FormDraft<S::Create, S::Update>> {
        self.draft.as_ref()
    }

    /// Mutable access for field edits
    pub fn draft_mut(&mut self) -> Option<&mut FormDraft<S::Create, S::Update>> {
        self.draft.as_mut()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn open_create(&mut self, initial: S::Create) {
        self.draft = Some(FormDraft::Create(initial));
    }

    /// Open an edit draft prefilled with every field of `record`
    pub fn open_edit(&mut self, record: &E)
    where
        S::Update: for<'a> From<&'a E>,
    {
        self.draft = Some(FormDraft::Edit {
            id: record.id().to_string(),
            data: S::Update::from(record),
        });
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }

    fn validate_draft(draft: &FormDraft<S::Create, S::Update>) -> AppResult<()> {
        match draft {
            FormDraft::Create(data) => data.validate()?,
            FormDraft::Edit { data, .. } => data.validate()?,
        }
        Ok(())
    }

    /// Validate locally, then write through the source and patch `list`.
    ///
    /// On any failure the draft stays open and nothing in `list` changes.
    /// Returns the id of the written record.
    pub async fn submit(&mut self, list: &mut ListViewController<E, S>) -> AppResult<String> {
        let draft = self
            .draft
            .as_ref()
            .ok_or_else(|| AppError::BadRequest("No form is open".to_string()))?;

        if let Err(e) = Self::validate_draft(draft) {
            self.notices.push(failure_notice(&e, String::new()));
            return Err(e);
        }

        let noun = E::NOUN.to_lowercase();
        let id = match draft {
            FormDraft::Create(data) => match self.source.add(data).await {
                Ok(id) => {
                    list.load().await;
                    self.notices.push(Notice::success(format!(
                        "{} cadastrado com sucesso!",
                        E::NOUN
                    )));
                    id
                }
                Err(e) => {
                    self.notices.push(failure_notice(
                        &e,
                        format!("Não foi possível cadastrar o {}.", noun),
                    ));
                    return Err(e);
                }
            },
            FormDraft::Edit { id, data } => match self.source.update(id, data).await {
                Ok(()) => {
                    list.sync_record(id).await;
                    self.notices.push(Notice::success(format!(
                        "{} atualizado com sucesso!",
                        E::NOUN
                    )));
                    id.clone()
                }
                Err(e) => {
                    self.notices.push(failure_notice(
                        &e,
                        format!("Não foi possível atualizar o {}.", noun),
                    ));
                    return Err(e);
                }
            },
        };

        self.draft = None;
        Ok(id)
    }
}
