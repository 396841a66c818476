use crate::api::CompetencyApi;
use skilldeck_api::{competency_from_dto, CompetencyDto, CreateCompetencyRequest, SubItemDto};
use skilldeck_model::{aggregate, evaluate, Competency, Evaluation, GlobalStats, SubItem};
use tracing::warn;

/// One competency as the UI sees it: the document plus its locally computed
/// evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetencyView {
    pub competency: Competency,
    pub evaluation: Evaluation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Ready {
        items: Vec<CompetencyView>,
        stats: GlobalStats,
    },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateForm {
    pub code: String,
    pub name: String,
    pub sub_items: Vec<SubItemDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Transient user-facing message; drained by the UI via
/// [`CompetencyController::take_notices`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Drives the competency list with optimistic updates: mutations apply
/// locally first, then sync to the server. A failed sync reloads the
/// authoritative list instead of trying to undo the local edit.
pub struct CompetencyController<A: CompetencyApi> {
    api: A,
    list: ListState,
    form: FormState,
    retained_form: Option<CreateForm>,
    notices: Vec<Notice>,
}

fn sub_items_to_dtos(sub_items: &[SubItem]) -> Vec<SubItemDto> {
    sub_items
        .iter()
        .map(|item| SubItemDto {
            name: item.name().to_string(),
            validated: item.validated(),
        })
        .collect()
}

impl<A: CompetencyApi> CompetencyController<A> {
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            list: ListState::Loading,
            form: FormState::Idle,
            retained_form: None,
            notices: Vec::new(),
        }
    }

    pub fn list_state(&self) -> &ListState {
        &self.list
    }

    pub fn form_state(&self) -> FormState {
        self.form
    }

    pub fn retained_form(&self) -> Option<&CreateForm> {
        self.retained_form.as_ref()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn push_info(&mut self, message: String) {
        self.notices.push(Notice {
            level: NoticeLevel::Info,
            message,
        });
    }

    fn push_error(&mut self, message: String) {
        self.notices.push(Notice {
            level: NoticeLevel::Error,
            message,
        });
    }

    fn view_from_dto(dto: &CompetencyDto) -> Result<CompetencyView, String> {
        let competency = competency_from_dto(dto).map_err(|e| e.to_string())?;
        let evaluation = evaluate(&competency.sub_items);
        Ok(CompetencyView {
            competency,
            evaluation,
        })
    }

    /// Fetches the authoritative list. Statistics are recomputed locally so
    /// they stay consistent with later optimistic edits.
    pub async fn load(&mut self) {
        match self.api.list().await {
            Ok(envelope) => {
                let views = envelope
                    .data
                    .iter()
                    .map(Self::view_from_dto)
                    .collect::<Result<Vec<_>, _>>();
                match views {
                    Ok(items) => {
                        let stats = aggregate(items.iter().map(|v| &v.competency));
                        self.list = ListState::Ready { items, stats };
                    }
                    Err(detail) => {
                        self.push_error(format!("malformed server payload: {detail}"));
                        self.list = ListState::Failed(detail);
                    }
                }
            }
            Err(e) => {
                self.push_error(format!("loading competencies failed: {e}"));
                self.list = ListState::Failed(e.to_string());
            }
        }
    }

    /// Applies an edit to one competency's sub-items in local state and
    /// returns the new list as DTOs for the sync call.
    fn apply_local_sub_items<F>(&mut self, id: &str, edit: F) -> Result<Vec<SubItemDto>, String>
    where
        F: FnOnce(&mut Vec<SubItem>) -> Result<(), String>,
    {
        let ListState::Ready { items, stats } = &mut self.list else {
            return Err("competency list is not loaded".to_string());
        };
        let Some(position) = items.iter().position(|v| v.competency.id.as_str() == id) else {
            return Err(format!("unknown competency {id}"));
        };
        {
            let view = &mut items[position];
            edit(&mut view.competency.sub_items)?;
            view.evaluation = evaluate(&view.competency.sub_items);
        }
        let dtos = sub_items_to_dtos(&items[position].competency.sub_items);
        *stats = aggregate(items.iter().map(|v| &v.competency));
        Ok(dtos)
    }

    async fn sync_sub_items(&mut self, id: &str, dtos: Vec<SubItemDto>, success: Option<&str>) {
        match self.api.replace_sub_items(id, &dtos).await {
            Ok(_) => {
                if let Some(message) = success {
                    self.push_info(message.to_string());
                }
            }
            Err(e) => {
                warn!(error = %e, id, "sub-item sync failed, reloading");
                self.push_error(format!("saving changes failed: {e}"));
                self.load().await;
            }
        }
    }

    pub async fn toggle_sub_item(&mut self, id: &str, index: usize) {
        let edited = self.apply_local_sub_items(id, |sub_items| {
            if index >= sub_items.len() {
                return Err(format!("no sub-item at index {index}"));
            }
            sub_items[index] = sub_items[index].toggled();
            Ok(())
        });
        match edited {
            Ok(dtos) => self.sync_sub_items(id, dtos, None).await,
            Err(detail) => self.push_error(detail),
        }
    }

    /// New sub-items always start non-validated.
    pub async fn add_sub_item(&mut self, id: &str, name: &str) {
        let item = match SubItem::parse(name, false) {
            Ok(item) => item,
            Err(e) => {
                self.push_error(e.to_string());
                return;
            }
        };
        let edited = self.apply_local_sub_items(id, move |sub_items| {
            sub_items.push(item);
            Ok(())
        });
        match edited {
            Ok(dtos) => self.sync_sub_items(id, dtos, Some("sub-item added")).await,
            Err(detail) => self.push_error(detail),
        }
    }

    /// Creation is not optimistic: the server assigns the id, so the row
    /// appears via a reload once the response arrives. On failure the form
    /// content is retained for a retry.
    pub async fn submit_create(&mut self, form: CreateForm) {
        self.form = FormState::Submitting;
        let request = CreateCompetencyRequest {
            code: form.code.trim().to_string(),
            name: form.name.trim().to_string(),
            sub_items: form.sub_items.clone(),
        };
        match self.api.create(&request).await {
            Ok(dto) => {
                self.form = FormState::Idle;
                self.retained_form = None;
                self.push_info(format!("competency {} created", dto.code));
                self.load().await;
            }
            Err(e) => {
                self.form = FormState::Idle;
                self.retained_form = Some(form);
                self.push_error(format!("creating competency failed: {e}"));
            }
        }
    }

    /// Deletion is not optimistic: the server confirms first, then the list
    /// is reloaded so every surviving row reflects the authoritative state.
    pub async fn delete(&mut self, id: &str) {
        match self.api.delete(id).await {
            Ok(()) => {
                self.push_info("competency deleted".to_string());
                self.load().await;
            }
            Err(e) => self.push_error(format!("deleting competency failed: {e}")),
        }
    }
}
