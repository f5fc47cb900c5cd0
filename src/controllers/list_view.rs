//! Paginated, filterable list state
//!
//! ```text
//! Idle -> Loading -> Loaded <-> LoadingMore
//! ```
//!
//! Loading is split into `begin_*` (state transition, returns the query to
//! run) and `finish_*` (apply the outcome) so a UI loop can run the fetch
//! itself; [`load`](ListViewController::load) and
//! [`load_more`](ListViewController::load_more) combine both.

use std::sync::Arc;

use super::{failure_notice, Labels, Notice};
use crate::{
    backend::{Cursor, ListQuery},
    error::{AppError, AppResult},
    models::{enums::NucleoId, search::{filter_indices, Searchable}},
    repository::{Entity, Page},
    services::EntitySource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    LoadingMore,
}

pub struct ListViewController<E, S> {
    source: Arc<S>,
    scope: Option<NucleoId>,
    page_size: usize,
    state: LoadState,
    items: Vec<E>,
    cursor: Option<Cursor>,
    has_more: bool,
    filter: String,
    /// Indices into `items` matching `filter`, ascending
    visible: Vec<usize>,
    notices: Vec<Notice>,
}

impl<E, S> ListViewController<E, S>
where
    E: Entity + Searchable + Labels,
    S: EntitySource<E>,
{
    pub fn new(source: Arc<S>, page_size: usize) -> Self {
        Self {
            source,
            scope: None,
            page_size: page_size.max(1),
            state: LoadState::Idle,
            items: Vec::new(),
            cursor: None,
            has_more: false,
            filter: String::new(),
            visible: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Restrict every query to one núcleo
    pub fn with_scope(mut self, nucleo: NucleoId) -> Self {
        self.scope = Some(nucleo);
        self
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Every loaded record, in fetch order
    pub fn items(&self) -> &[E] {
        &self.items
    }

    /// Loaded records matching the current filter, in fetch order
    pub fn visible(&self) -> Vec<&E> {
        self.visible.iter().map(|&i| &self.items[i]).collect()
    }

    pub fn filter_text(&self) -> &str {
        &self.filter
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn page_query(&self) -> ListQuery {
        let mut query = self.source.base_query();
        if let Some(nucleo) = self.scope {
            query = query.where_eq("nucleoId", nucleo.as_str());
        }
        query.limit(Some(self.page_size))
    }

    /// Start a fresh load. Returns `None` while a load is already running.
    pub fn begin_load(&mut self) -> Option<ListQuery> {
        if matches!(self.state, LoadState::Loading | LoadState::LoadingMore) {
            return None;
        }
        self.state = LoadState::Loading;
        Some(self.page_query())
    }

    pub fn finish_load(&mut self, result: AppResult<Page<E>>) {
        if self.state != LoadState::Loading {
            return;
        }
        match result {
            Ok(page) => {
                self.has_more = page.cursor.is_some();
                self.items = page.items;
                self.cursor = page.cursor;
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", E::PLURAL, e);
                self.items.clear();
                self.cursor = None;
                self.has_more = false;
                self.state = LoadState::Idle;
                self.notices.push(Notice::error(format!(
                    "Não foi possível carregar os {}.",
                    E::PLURAL
                )));
            }
        }
        self.refilter();
    }

    /// Start fetching the next page. Returns `None` unless the list is loaded
    /// and more data may exist; a second call while one is in flight is ignored.
    pub fn begin_load_more(&mut self) -> Option<ListQuery> {
        if self.state != LoadState::Loaded || !self.has_more {
            return None;
        }
        self.state = LoadState::LoadingMore;
        Some(self.page_query().start_after(self.cursor.clone()))
    }

    pub fn finish_load_more(&mut self, result: AppResult<Page<E>>) {
        if self.state != LoadState::LoadingMore {
            return;
        }
        self.state = LoadState::Loaded;
        match result {
            Ok(page) => match page.cursor {
                Some(cursor) => {
                    for item in page.items {
                        if !self.items.iter().any(|e| e.id() == item.id()) {
                            self.items.push(item);
                        }
                    }
                    self.cursor = Some(cursor);
                    self.refilter();
                }
                None => self.has_more = false,
            },
            Err(e) => {
                tracing::warn!("Failed to load more {}: {}", E::PLURAL, e);
                self.notices.push(Notice::error(format!(
                    "Não foi possível carregar os {}.",
                    E::PLURAL
                )));
            }
        }
    }

    pub async fn load(&mut self) {
        if let Some(query) = self.begin_load() {
            let result = self.source.fetch(&query).await;
            self.finish_load(result);
        }
    }

    pub async fn load_more(&mut self) {
        if let Some(query) = self.begin_load_more() {
            let result = self.source.fetch(&query).await;
            self.finish_load_more(result);
        }
    }

    /// Apply the search box text. Does not touch the load state.
    pub fn set_filter(&mut self, text: &str) {
        self.filter = text.to_string();
        self.refilter();
    }

    fn refilter(&mut self) {
        self.visible = filter_indices(&self.items, &self.filter);
    }

    /// Replace a loaded record in place; unknown ids are ignored
    pub fn replace(&mut self, record: E) {
        if let Some(slot) = self.items.iter_mut().find(|e| e.id() == record.id()) {
            *slot = record;
            self.refilter();
        }
    }

    pub fn remove(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|e| e.id() != id);
        if self.items.len() != before {
            self.refilter();
        }
    }

    /// Delete a record and drop it from the list. A record the backend no
    /// longer has is treated as already deleted.
    pub async fn delete(&mut self, id: &str) -> AppResult<()> {
        match self.source.delete(id).await {
            Ok(()) | Err(AppError::NotFound(_)) => {
                self.remove(id);
                self.notices.push(Notice::success(format!(
                    "{} excluído com sucesso!",
                    E::NOUN
                )));
                Ok(())
            }
            Err(e) => {
                self.notices.push(failure_notice(
                    &e,
                    format!("Não foi possível excluir o {}.", E::NOUN.to_lowercase()),
                ));
                Err(e)
            }
        }
    }

    /// Update a record and patch the list with the stored result
    pub async fn update(&mut self, id: &str, data: &S::Update) -> AppResult<()> {
        if let Err(e) = self.source.update(id, data).await {
            self.notices.push(failure_notice(
                &e,
                format!("Não foi possível atualizar o {}.", E::NOUN.to_lowercase()),
            ));
            return Err(e);
        }
        self.notices.push(Notice::success(format!(
            "{} atualizado com sucesso!",
            E::NOUN
        )));
        self.sync_record(id).await;
        Ok(())
    }

    /// Re-read one record and patch it in place. On failure the loaded
    /// records stay as they are.
    pub(crate) async fn sync_record(&mut self, id: &str) {
        match self.source.get(id).await {
            Ok(Some(record)) => self.replace(record),
            Ok(None) => self.remove(id),
            Err(e) => {
                tracing::warn!("Failed to refresh {} {}: {}", E::LABEL, id, e);
                self.notices.push(Notice::error(format!(
                    "Não foi possível recarregar os {}.",
                    E::PLURAL
                )));
            }
        }
    }
}
