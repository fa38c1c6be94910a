use crate::components::dashboard::Dashboard;
use crate::components::institutions::InstitutionsPage;
use institution_core::dashboard::{NavSection, NavState, APP_TITLE};
use leptos::*;

#[component]
pub fn App() -> impl IntoView {
    let nav = create_rw_signal(NavState::default());
    let show_institutions = create_memo(move |_| nav.get().active() == NavSection::Institutions);

    view! {
      <header>
        <div class="container header-row">
          <h1>{APP_TITLE}</h1>
          // Session handling lives outside this app.
          <button class="btn-primary">"Log out"</button>
        </div>
      </header>

      <div class="container layout">
        <nav class="sidebar">
          {move || {
              nav.get()
                  .items()
                  .into_iter()
                  .map(|item| view! {
                    <a
                      href=item.href
                      class:current=item.current
                      on:click=move |ev| {
                        ev.prevent_default();
                        nav.update(|n| *n = n.select(item.section));
                      }
                    >
                      {item.label}
                    </a>
                  })
                  .collect_view()
          }}
        </nav>

        <main class="content">
          <Show when=move || show_institutions.get() fallback=|| view! { <Dashboard/> }>
            <InstitutionsPage/>
          </Show>
        </main>
      </div>
    }
}
