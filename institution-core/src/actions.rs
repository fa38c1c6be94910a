//! Async operations over the institution view-model
//!
//! `refresh`, `save` and `remove` perform the requests of one user action
//! and describe the result as an [`Outcome`]. A front end with overlapping
//! requests applies that outcome to whatever its view is when the response
//! arrives. `load`, `submit` and `delete` are the same operations for
//! callers that run one action at a time. Failures are logged and swallowed:
//! they only show up in `last_error`.

use crate::api::{Confirm, InstitutionApi, DELETE_PROMPT};
use crate::form::InstitutionForm;
use crate::view::{FormMode, InstitutionsView, Outcome};

/// Full refresh of the collection.
pub async fn refresh<A>(api: &A) -> Outcome
where
    A: InstitutionApi + ?Sized,
{
    let result = api.list().await;
    match &result {
        Ok(institutions) => tracing::debug!("Loaded {} institutions", institutions.len()),
        Err(e) => tracing::error!("Error fetching institutions: {}", e),
    }
    Outcome::Refreshed(result)
}

/// Sends `draft` as a create or an update and refreshes on success.
/// An incomplete draft sends nothing.
pub async fn save<A>(api: &A, mode: FormMode, draft: &InstitutionForm) -> Outcome
where
    A: InstitutionApi + ?Sized,
{
    let missing = draft.missing_required();
    if !missing.is_empty() {
        tracing::warn!(
            "Submission blocked, required fields empty: {}",
            missing.iter().map(|f| f.name()).collect::<Vec<_>>().join(", ")
        );
        return Outcome::Unchanged;
    }

    let payload = draft.to_payload();
    let result = match mode {
        FormMode::Create => api.create(&payload).await,
        FormMode::Edit(id) => api.update(id, &payload).await,
    };

    match result {
        Ok(()) => {
            match mode {
                FormMode::Create => {
                    tracing::info!("Created institution '{}'", payload.institution_code)
                }
                FormMode::Edit(id) => tracing::info!("Updated institution {}", id),
            }
            match refresh(api).await {
                Outcome::Refreshed(list) => Outcome::Saved(list),
                other => other,
            }
        }
        Err(e) => {
            tracing::error!("Error saving institution: {}", e);
            Outcome::Rejected(e)
        }
    }
}

/// Deletes `id` and refreshes on success. Confirmation is the caller's job,
/// see [`confirm_delete`].
pub async fn remove<A>(api: &A, id: i64) -> Outcome
where
    A: InstitutionApi + ?Sized,
{
    match api.delete(id).await {
        Ok(()) => {
            tracing::info!("Deleted institution {}", id);
            refresh(api).await
        }
        Err(e) => {
            tracing::error!("Error deleting institution: {}", e);
            Outcome::Rejected(e)
        }
    }
}

/// Asks before a delete. Must run synchronously in the triggering event.
pub fn confirm_delete<C>(confirm: &C, id: i64) -> bool
where
    C: Confirm + ?Sized,
{
    let confirmed = confirm.confirm(DELETE_PROMPT);
    if !confirmed {
        tracing::debug!("Delete of institution {} declined", id);
    }
    confirmed
}

pub async fn load<A>(api: &A, view: InstitutionsView) -> InstitutionsView
where
    A: InstitutionApi + ?Sized,
{
    view.apply(refresh(api).await)
}

/// Submits the view's draft against its edit target.
pub async fn submit<A>(api: &A, view: InstitutionsView) -> InstitutionsView
where
    A: InstitutionApi + ?Sized,
{
    let outcome = save(api, view.form_mode(), &view.draft).await;
    view.apply(outcome)
}

pub async fn delete<A, C>(api: &A, confirm: &C, view: InstitutionsView, id: i64) -> InstitutionsView
where
    A: InstitutionApi + ?Sized,
    C: Confirm + ?Sized,
{
    if !confirm_delete(confirm, id) {
        return view;
    }
    view.apply(remove(api, id).await)
}
