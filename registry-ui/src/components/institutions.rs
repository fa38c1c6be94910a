use crate::bridge::{HttpBridge, WindowConfirm};
use crate::components::institution_modal::InstitutionModal;
use crate::components::status_badge::StatusBadge;
use institution_core::actions;
use institution_core::config::ClientConfig;
use institution_core::dto::MedicalInstitution;
use institution_core::view::{InstitutionsView, Outcome};
use leptos::*;
use wasm_bindgen_futures::spawn_local;

/// Applies a finished request to the view as it is now, not as it was when
/// the request started.
fn settle(state: RwSignal<InstitutionsView>, outcome: Outcome) {
    state.update(|current| *current = std::mem::take(current).apply(outcome));
}

#[component]
pub fn InstitutionsPage() -> impl IntoView {
    let api = store_value(HttpBridge::new(ClientConfig::same_origin()));
    let state = create_rw_signal(InstitutionsView::new());

    let load = move || {
        spawn_local(async move {
            let outcome = actions::refresh(&api.get_value()).await;
            settle(state, outcome);
        });
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let (mode, draft) = state.with_untracked(|v| (v.form_mode(), v.draft.clone()));
        spawn_local(async move {
            let outcome = actions::save(&api.get_value(), mode, &draft).await;
            settle(state, outcome);
        });
    };

    let on_delete = move |id: i64| {
        if !actions::confirm_delete(&WindowConfirm, id) {
            return;
        }
        spawn_local(async move {
            let outcome = actions::remove(&api.get_value(), id).await;
            settle(state, outcome);
        });
    };

    load();

    view! {
      <Show
        when=move || !state.with(|v| v.loading)
        fallback=|| view! { <div class="loading">"Loading..."</div> }
      >
        <h1>"Medical Institution Management"</h1>
        <p class="meta">"Browse and manage registered medical institutions."</p>

        <div class="toolbar">
          <input
            type="text"
            placeholder="Search by institution name or code..."
            prop:value=move || state.with(|v| v.query.clone())
            on:input=move |ev| state.update(|v| v.query = event_target_value(&ev))
          />
          <button
            class="btn-primary"
            on:click=move |_| state.update(|v| *v = std::mem::take(v).open_create())
          >
            "New registration"
          </button>
        </div>

        <div class="card">
          <table>
            <thead>
              <tr>
                <th>"Code"</th>
                <th>"Name"</th>
                <th>"Type"</th>
                <th>"Representative"</th>
                <th>"Status"</th>
                <th>"Actions"</th>
              </tr>
            </thead>
            <tbody>
              <For
                each=move || state.with(|v| v.filtered())
                key=|i| i.clone()
                children=move |i: MedicalInstitution| {
                  let id = i.id;
                  let active = i.is_active();
                  let record = i.clone();
                  view! {
                    <tr>
                      <td><b>{i.institution_code}</b></td>
                      <td>{i.institution_name}</td>
                      <td class="meta">{i.institution_type}</td>
                      <td class="meta">{i.representative_name}</td>
                      <td><StatusBadge active=active/></td>
                      <td>
                        <button on:click=move |_| {
                          let record = record.clone();
                          state.update(|v| *v = std::mem::take(v).open_edit(record));
                        }>"Edit"</button>
                        " "
                        <button class="danger" on:click=move |_| on_delete(id)>"Delete"</button>
                      </td>
                    </tr>
                  }
                }
              />
            </tbody>
          </table>
        </div>

        <Show when=move || state.with(|v| v.modal_open) fallback=|| ()>
          <InstitutionModal state=state on_submit=on_submit/>
        </Show>
      </Show>
    }
}
