use leptos::*;

/// Green "Active" or red "Inactive" pill.
#[component]
pub fn StatusBadge(active: bool) -> impl IntoView {
    let (class, label) = if active {
        ("badge active", "Active")
    } else {
        ("badge inactive", "Inactive")
    };

    view! { <span class=class>{label}</span> }
}
