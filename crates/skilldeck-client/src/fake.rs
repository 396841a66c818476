//! In-memory API double backed by the real store, so fake responses carry the
//! same validation and evaluation behavior as the server.

use crate::api::{ApiClientError, CompetencyApi};
use async_trait::async_trait;
use skilldeck_api::{
    competency_to_dto, draft_from_create, stats_to_dto, sub_item_drafts, CompetencyDto,
    CreateCompetencyRequest, ListEnvelope, SubItemDto,
};
use skilldeck_model::aggregate;
use skilldeck_store::{CompetencyStore, MemoryStore};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Default)]
pub struct FakeApi {
    store: MemoryStore,
    list_calls: AtomicU64,
    fail_next_list: AtomicBool,
    fail_next_create: AtomicBool,
    fail_next_replace: AtomicBool,
    fail_next_delete: AtomicBool,
}

impl FakeApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `list` calls observed, including injected failures.
    pub fn list_calls(&self) -> u64 {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn fail_next_list(&self) {
        self.fail_next_list.store(true, Ordering::SeqCst);
    }

    pub fn fail_next_create(&self) {
        self.fail_next_create.store(true, Ordering::SeqCst);
    }

    pub fn fail_next_replace(&self) {
        self.fail_next_replace.store(true, Ordering::SeqCst);
    }

    pub fn fail_next_delete(&self) {
        self.fail_next_delete.store(true, Ordering::SeqCst);
    }

    fn trip(flag: &AtomicBool, operation: &str) -> Result<(), ApiClientError> {
        if flag.swap(false, Ordering::SeqCst) {
            Err(ApiClientError(format!("injected {operation} failure")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CompetencyApi for FakeApi {
    async fn list(&self) -> Result<ListEnvelope, ApiClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Self::trip(&self.fail_next_list, "list")?;
        let competencies = self
            .store
            .get_all()
            .await
            .map_err(|e| ApiClientError(e.to_string()))?;
        Ok(ListEnvelope {
            success: true,
            statistics: stats_to_dto(aggregate(&competencies)),
            data: competencies.iter().map(competency_to_dto).collect(),
        })
    }

    async fn create(
        &self,
        request: &CreateCompetencyRequest,
    ) -> Result<CompetencyDto, ApiClientError> {
        Self::trip(&self.fail_next_create, "create")?;
        self.store
            .create(draft_from_create(request))
            .await
            .map(|competency| competency_to_dto(&competency))
            .map_err(|e| ApiClientError(e.to_string()))
    }

    async fn replace_sub_items(
        &self,
        id: &str,
        sub_items: &[SubItemDto],
    ) -> Result<CompetencyDto, ApiClientError> {
        Self::trip(&self.fail_next_replace, "replace")?;
        self.store
            .replace_sub_items(id, sub_item_drafts(sub_items))
            .await
            .map(|competency| competency_to_dto(&competency))
            .map_err(|e| ApiClientError(e.to_string()))
    }

    async fn delete(&self, id: &str) -> Result<(), ApiClientError> {
        Self::trip(&self.fail_next_delete, "delete")?;
        self.store
            .delete(id)
            .await
            .map_err(|e| ApiClientError(e.to_string()))
    }
}
