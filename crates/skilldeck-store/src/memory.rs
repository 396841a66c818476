use crate::{CompetencyStore, StoreError};
use async_trait::async_trait;
use skilldeck_model::{
    parse_code, parse_name, Competency, CompetencyDraft, CompetencyId, SubItem, SubItemDraft,
};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

fn unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

fn parse_sub_items(drafts: Vec<SubItemDraft>) -> Result<Vec<SubItem>, StoreError> {
    drafts
        .iter()
        .map(|draft| draft.parse().map_err(StoreError::from))
        .collect()
}

/// In-memory document store. A `Vec` keeps insertion order; the lock makes
/// each single-document write atomic.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<Vec<Competency>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompetencyStore for MemoryStore {
    async fn create(&self, draft: CompetencyDraft) -> Result<Competency, StoreError> {
        let code = parse_code(&draft.code)?;
        let name = parse_name(&draft.name)?;
        let sub_items = parse_sub_items(draft.sub_items)?;

        let mut documents = self.documents.write().await;
        if documents.iter().any(|c| c.code == code) {
            return Err(StoreError::DuplicateCode(code.into_inner()));
        }
        let now = unix_millis();
        let competency = Competency {
            id: CompetencyId::parse(&Uuid::new_v4().simple().to_string())
                .map_err(StoreError::from)?,
            code,
            name,
            sub_items,
            created_at_ms: now,
            updated_at_ms: now,
        };
        documents.push(competency.clone());
        info!(id = %competency.id, code = %competency.code, "competency created");
        Ok(competency)
    }

    async fn get_all(&self) -> Result<Vec<Competency>, StoreError> {
        Ok(self.documents.read().await.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Competency, StoreError> {
        self.documents
            .read()
            .await
            .iter()
            .find(|c| c.id.as_str() == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn replace_sub_items(
        &self,
        id: &str,
        sub_items: Vec<SubItemDraft>,
    ) -> Result<Competency, StoreError> {
        let parsed = parse_sub_items(sub_items)?;
        let mut documents = self.documents.write().await;
        let competency = documents
            .iter_mut()
            .find(|c| c.id.as_str() == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        competency.sub_items = parsed;
        competency.updated_at_ms = unix_millis();
        info!(id = %competency.id, items = competency.sub_items.len(), "sub-items replaced");
        Ok(competency.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        let position = documents
            .iter()
            .position(|c| c.id.as_str() == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let removed = documents.remove(position);
        info!(id = %removed.id, code = %removed.code, "competency deleted");
        Ok(())
    }
}
