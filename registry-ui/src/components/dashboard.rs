use institution_core::dashboard::{
    ApplicationStatus, Trend, DASHBOARD_SUBTITLE, DASHBOARD_TITLE, RECENT_APPLICATIONS, STATS,
};
use leptos::*;

fn status_class(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::UnderReview => "badge review",
        ApplicationStatus::Approved => "badge active",
    }
}

/// Fixed summary figures and recent applications. Nothing here is fetched.
#[component]
pub fn Dashboard() -> impl IntoView {
    view! {
      <div>
        <h2>{DASHBOARD_TITLE}</h2>
        <p class="meta">{DASHBOARD_SUBTITLE}</p>

        <dl class="stats">
          {STATS
            .iter()
            .map(|s| {
              let class = match s.trend {
                Trend::Positive => "positive",
                Trend::Negative => "negative",
              };
              view! {
                <div class="card">
                  <dt class="meta">{s.name}</dt>
                  <dd class="value">{s.value}</dd>
                  <dd class=class>{s.change}</dd>
                </div>
              }
            })
            .collect_view()}
        </dl>

        <h3>"Recent applications"</h3>
        <div class="card">
          <table>
            <thead>
              <tr>
                <th>"Application no."</th>
                <th>"Institution"</th>
                <th>"Type"</th>
                <th>"Status"</th>
                <th>"Submitted"</th>
              </tr>
            </thead>
            <tbody>
              {RECENT_APPLICATIONS
                .iter()
                .map(|a| view! {
                  <tr>
                    <td><b>{a.number}</b></td>
                    <td>{a.institution}</td>
                    <td>{a.application_type}</td>
                    <td><span class=status_class(a.status)>{a.status.label()}</span></td>
                    <td>{a.submitted_on}</td>
                  </tr>
                })
                .collect_view()}
            </tbody>
          </table>
        </div>
      </div>
    }
}
