mod app;
mod bridge;
mod console;

pub mod components {
    pub mod dashboard;
    pub mod institution_modal;
    pub mod institutions;
    pub mod status_badge;
}

fn main() {
    console::init(tracing::Level::DEBUG);
    leptos::mount_to_body(app::App);
}
