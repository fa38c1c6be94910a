use institution_core::dto::InstitutionType;
use institution_core::form::FormField;
use institution_core::view::InstitutionsView;
use leptos::*;

/// Create/edit form. `required` inputs make the browser refuse to submit
/// while a mandatory field is empty.
#[component]
pub fn InstitutionModal(
    state: RwSignal<InstitutionsView>,
    #[prop(into)] on_submit: Callback<ev::SubmitEvent>,
) -> impl IntoView {
    let editing = move || state.with(|v| v.editing.is_some());

    view! {
      <div class="overlay">
        <div class="modal">
          <h3>
            {move || if editing() { "Edit medical institution" } else { "Register medical institution" }}
          </h3>
          <form on:submit=move |ev| on_submit.call(ev)>
            <div class="stack">
              <TextInput state=state field=FormField::InstitutionCode/>
              <TextInput state=state field=FormField::InstitutionName/>
              <TypeSelect state=state/>
              <AddressInput state=state/>
              <TextInput state=state field=FormField::Phone input_type="tel"/>
              <TextInput state=state field=FormField::Email input_type="email"/>
              <TextInput state=state field=FormField::RepresentativeName/>
              <TextInput state=state field=FormField::LicenseNumber/>
            </div>
            <div class="row">
              <button
                type="button"
                class="btn-outline"
                on:click=move |_| state.update(|v| *v = std::mem::take(v).close_modal())
              >
                "Cancel"
              </button>
              <button type="submit" class="btn-primary">
                {move || if editing() { "Update" } else { "Register" }}
              </button>
            </div>
          </form>
        </div>
      </div>
    }
}

#[component]
fn TextInput(
    state: RwSignal<InstitutionsView>,
    field: FormField,
    #[prop(default = "text")] input_type: &'static str,
) -> impl IntoView {
    view! {
      <div>
        <label>{field.label()}</label>
        <input
          type=input_type
          name=field.name()
          class="input-field"
          required=field.is_required()
          prop:value=move || state.with(|v| v.draft.get(field).to_string())
          on:input=move |ev| state.update(|v| v.draft.set(field, event_target_value(&ev)))
        />
      </div>
    }
}

#[component]
fn AddressInput(state: RwSignal<InstitutionsView>) -> impl IntoView {
    let field = FormField::Address;
    view! {
      <div>
        <label>{field.label()}</label>
        <textarea
          name=field.name()
          class="input-field"
          rows=3
          required=true
          prop:value=move || state.with(|v| v.draft.get(field).to_string())
          on:input=move |ev| state.update(|v| v.draft.set(field, event_target_value(&ev)))
        ></textarea>
      </div>
    }
}

#[component]
fn TypeSelect(state: RwSignal<InstitutionsView>) -> impl IntoView {
    let field = FormField::InstitutionType;
    view! {
      <div>
        <label>{field.label()}</label>
        <select
          name=field.name()
          class="input-field"
          required=true
          on:change=move |ev| state.update(|v| v.draft.set(field, event_target_value(&ev)))
        >
          <option value="">"Select..."</option>
          {InstitutionType::ALL
            .into_iter()
            .map(|t| {
              let label = t.label();
              view! {
                <option
                  value=label
                  selected=move || state.with(|v| v.draft.get(field) == label)
                >
                  {label}
                </option>
              }
            })
            .collect_view()}
        </select>
      </div>
    }
}
