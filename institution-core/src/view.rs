//! View-model for the institution management screen
//!
//! Transitions consume the current value and return the next one, so a
//! front end only ever swaps in a whole new `InstitutionsView`.

use crate::dto::MedicalInstitution;
use crate::error::ApiError;
use crate::filter::filter_institutions;
use crate::form::InstitutionForm;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewPhase {
    Loading,
    Loaded,
    ModalOpen(FormMode),
}

/// What a finished request changes.
///
/// Requests overlap with user input, so an outcome is applied to the view
/// as it is when the response arrives. Each variant only touches the fields
/// its request owns; the query, and the modal unless a save went through,
/// stay as the user left them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing was sent: a declined confirmation or an incomplete draft.
    Unchanged,
    /// Result of a full refresh.
    Refreshed(Result<Vec<MedicalInstitution>, ApiError>),
    /// A create or update was accepted; carries the refresh that followed.
    Saved(Result<Vec<MedicalInstitution>, ApiError>),
    /// A mutation was rejected before any refresh.
    Rejected(ApiError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstitutionsView {
    /// Last full snapshot from the backend, in backend order.
    pub institutions: Vec<MedicalInstitution>,
    pub query: String,
    /// True until the first list request settles.
    pub loading: bool,
    pub modal_open: bool,
    /// Record being edited; `None` while creating.
    pub editing: Option<MedicalInstitution>,
    pub draft: InstitutionForm,
    /// Most recent swallowed failure, for diagnostics only.
    pub last_error: Option<String>,
}

impl Default for InstitutionsView {
    fn default() -> Self {
        Self::new()
    }
}

impl InstitutionsView {
    pub fn new() -> Self {
        Self {
            institutions: Vec::new(),
            query: String::new(),
            loading: true,
            modal_open: false,
            editing: None,
            draft: InstitutionForm::default(),
            last_error: None,
        }
    }

    pub fn phase(&self) -> ViewPhase {
        if self.modal_open {
            ViewPhase::ModalOpen(self.form_mode())
        } else if self.loading {
            ViewPhase::Loading
        } else {
            ViewPhase::Loaded
        }
    }

    pub fn form_mode(&self) -> FormMode {
        match &self.editing {
            Some(record) => FormMode::Edit(record.id),
            None => FormMode::Create,
        }
    }

    /// Rows to render for the current query.
    pub fn filtered(&self) -> Vec<MedicalInstitution> {
        filter_institutions(&self.institutions, &self.query)
    }

    pub fn find(&self, id: i64) -> Option<&MedicalInstitution> {
        self.institutions.iter().find(|i| i.id == id)
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Replaces the collection wholesale.
    pub fn loaded(mut self, institutions: Vec<MedicalInstitution>) -> Self {
        self.institutions = institutions;
        self.loading = false;
        self.last_error = None;
        self
    }

    /// A failed list request settles loading but keeps whatever was held.
    pub fn load_failed(mut self, error: &ApiError) -> Self {
        self.loading = false;
        self.last_error = Some(error.to_string());
        self
    }

    /// A failed mutation changes nothing the user can see.
    pub fn failed(mut self, error: &ApiError) -> Self {
        self.last_error = Some(error.to_string());
        self
    }

    pub fn open_create(mut self) -> Self {
        self.modal_open = true;
        self.editing = None;
        self.draft = InstitutionForm::default();
        self
    }

    pub fn open_edit(mut self, record: MedicalInstitution) -> Self {
        self.modal_open = true;
        self.draft = InstitutionForm::from_record(&record);
        self.editing = Some(record);
        self
    }

    pub fn with_draft(mut self, draft: InstitutionForm) -> Self {
        self.draft = draft;
        self
    }

    pub fn apply(self, outcome: Outcome) -> Self {
        match outcome {
            Outcome::Unchanged => self,
            Outcome::Refreshed(Ok(institutions)) => self.loaded(institutions),
            Outcome::Refreshed(Err(e)) => self.load_failed(&e),
            Outcome::Saved(refresh) => self.close_modal().apply(Outcome::Refreshed(refresh)),
            Outcome::Rejected(e) => self.failed(&e),
        }
    }

    /// Cancel, or the tail of a successful submit.
    pub fn close_modal(mut self) -> Self {
        self.modal_open = false;
        self.editing = None;
        self.draft = InstitutionForm::default();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormField;

    fn record(id: i64) -> MedicalInstitution {
        MedicalInstitution {
            id,
            institution_code: format!("H{id:03}"),
            institution_name: format!("Hospital {id}"),
            status: "ACTIVE".into(),
            ..MedicalInstitution::default()
        }
    }

    #[test]
    fn starts_loading() {
        let view = InstitutionsView::new();
        assert_eq!(view.phase(), ViewPhase::Loading);
        assert!(view.institutions.is_empty());
    }

    #[test]
    fn loaded_replaces_collection() {
        let view = InstitutionsView::new()
            .loaded(vec![record(1), record(2)])
            .loaded(vec![record(3)]);
        assert_eq!(view.phase(), ViewPhase::Loaded);
        assert_eq!(view.institutions, vec![record(3)]);
    }

    #[test]
    fn load_failure_keeps_previous_collection() {
        let err = ApiError::Transport("offline".into());
        let view = InstitutionsView::new().loaded(vec![record(1)]).load_failed(&err);
        assert_eq!(view.institutions, vec![record(1)]);
        assert_eq!(view.last_error.as_deref(), Some("request failed: offline"));
        assert!(!view.loading);
    }

    #[test]
    fn edit_then_cancel_returns_to_loaded() {
        let view = InstitutionsView::new().loaded(vec![record(42)]);
        let editing = view.clone().open_edit(record(42));

        assert_eq!(editing.phase(), ViewPhase::ModalOpen(FormMode::Edit(42)));
        assert_eq!(editing.draft.get(FormField::InstitutionCode), "H042");

        let cancelled = editing.close_modal();
        assert_eq!(cancelled.phase(), ViewPhase::Loaded);
        assert_eq!(cancelled.editing, None);
        assert_eq!(cancelled.draft, InstitutionForm::default());
    }

    #[test]
    fn create_starts_from_empty_draft() {
        let view = InstitutionsView::new()
            .loaded(vec![record(1)])
            .open_edit(record(1))
            .close_modal()
            .open_create();
        assert_eq!(view.phase(), ViewPhase::ModalOpen(FormMode::Create));
        assert_eq!(view.draft, InstitutionForm::default());
    }

    #[test]
    fn refresh_lands_on_the_current_view() {
        // A delete started from a plain list; meanwhile the user opened the
        // create modal and began typing.
        let current = InstitutionsView::new()
            .loaded(vec![record(1), record(2)])
            .with_query("h00")
            .open_create()
            .with_draft(InstitutionForm::default().with(FormField::InstitutionName, "Draft"));

        let after = current
            .clone()
            .apply(Outcome::Refreshed(Ok(vec![record(2)])));

        assert_eq!(after.institutions, vec![record(2)]);
        assert!(after.modal_open);
        assert_eq!(after.draft, current.draft);
        assert_eq!(after.query, "h00");
    }

    #[test]
    fn rejection_keeps_what_was_typed_since() {
        let current = InstitutionsView::new()
            .loaded(vec![record(1), record(2)])
            .open_edit(record(1))
            .with_draft(InstitutionForm::from_record(&record(1)).with(FormField::Address, "typed later"));
        let err = ApiError::Transport("offline".into());

        let after = current.clone().apply(Outcome::Rejected(err));
        assert_eq!(after.draft.get(FormField::Address), "typed later");
        assert_eq!(after.institutions, current.institutions);
        assert_eq!(after.phase(), ViewPhase::ModalOpen(FormMode::Edit(1)));
        assert_eq!(after.last_error.as_deref(), Some("request failed: offline"));
    }

    #[test]
    fn save_closes_the_modal_and_installs_the_refresh() {
        let after = InstitutionsView::new()
            .loaded(vec![record(1)])
            .with_query("h")
            .open_create()
            .apply(Outcome::Saved(Ok(vec![record(1), record(2)])));
        assert_eq!(after.phase(), ViewPhase::Loaded);
        assert_eq!(after.institutions.len(), 2);
        assert_eq!(after.query, "h");
    }

    #[test]
    fn unchanged_is_a_no_op() {
        let view = InstitutionsView::new().loaded(vec![record(1)]).open_create();
        assert_eq!(view.clone().apply(Outcome::Unchanged), view);
    }

    #[test]
    fn rendered_rows_follow_query() {
        let view = InstitutionsView::new()
            .loaded(vec![record(1), record(2), record(12)])
            .with_query("h01");
        let ids: Vec<i64> = view.filtered().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![12]);
        assert_eq!(view.with_query("").filtered().len(), 3);
    }
}
