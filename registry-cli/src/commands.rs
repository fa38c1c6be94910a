use crate::applications::{self, ApplicationCommand};
use crate::error::CliError;
use clap::{Args, Subcommand};
use institution_core::actions;
use institution_core::api::{ApplicationApi, Confirm, InstitutionApi};
use institution_core::dashboard::{
    Trend, DASHBOARD_SUBTITLE, DASHBOARD_TITLE, RECENT_APPLICATIONS, STATS,
};
use institution_core::dto::{InstitutionType, MedicalInstitution};
use institution_core::filter::filter_institutions;
use institution_core::form::{FormField, InstitutionForm};
use institution_core::view::InstitutionsView;
use std::io::Write;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List registered institutions
    List {
        /// Case-insensitive match against name or code
        #[arg(short, long)]
        query: Option<String>,
        /// Only institutions with this status (e.g. ACTIVE)
        #[arg(long)]
        status: Option<String>,
    },
    /// Print one institution as JSON
    Show { id: i64 },
    /// Find an institution by its code
    Lookup { code: String },
    /// Register a new institution
    Create(InstitutionArgs),
    /// Change fields of an existing institution
    Update {
        id: i64,
        #[command(flatten)]
        fields: InstitutionArgs,
    },
    /// Delete an institution
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the dashboard summary
    Dashboard,
    /// Review applications filed by institutions
    Applications {
        #[command(subcommand)]
        command: ApplicationCommand,
    },
}

/// Form fields as flags. Unset flags leave the draft untouched.
#[derive(Debug, Default, Args)]
pub struct InstitutionArgs {
    #[arg(long)]
    pub code: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long = "type")]
    pub institution_type: Option<InstitutionType>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub representative: Option<String>,
    #[arg(long)]
    pub license: Option<String>,
}

impl InstitutionArgs {
    pub fn apply(self, mut form: InstitutionForm) -> InstitutionForm {
        let values = [
            (FormField::InstitutionCode, self.code),
            (FormField::InstitutionName, self.name),
            (
                FormField::InstitutionType,
                self.institution_type.map(|t| t.label().to_string()),
            ),
            (FormField::Address, self.address),
            (FormField::Phone, self.phone),
            (FormField::Email, self.email),
            (FormField::RepresentativeName, self.representative),
            (FormField::LicenseNumber, self.license),
        ];
        for (field, value) in values {
            if let Some(value) = value {
                form.set(field, value);
            }
        }
        form
    }
}

pub async fn execute<A, C, W>(
    api: &A,
    confirm: &C,
    command: Command,
    out: &mut W,
) -> Result<(), CliError>
where
    A: InstitutionApi + ApplicationApi + ?Sized,
    C: Confirm + ?Sized,
    W: Write,
{
    match command {
        Command::List { query, status } => {
            let query = query.unwrap_or_default();
            let rows = match status {
                Some(status) => filter_institutions(&api.list_by_status(&status).await?, &query),
                None => {
                    let view = actions::load(api, InstitutionsView::new()).await;
                    ensure_ok(&view)?;
                    view.with_query(query).filtered()
                }
            };
            write_table(out, &rows)?;
        }
        Command::Show { id } => {
            let record = api.get(id).await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
        }
        Command::Lookup { code } => {
            let record = api.find_by_code(&code).await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
        }
        Command::Create(fields) => {
            let view = InstitutionsView::new().open_create();
            let draft = fields.apply(view.draft.clone());
            let view = save(api, view.with_draft(draft)).await?;
            writeln!(
                out,
                "Registered. {} institutions on file.",
                view.institutions.len()
            )?;
        }
        Command::Update { id, fields } => {
            let record = api.get(id).await?;
            let view = InstitutionsView::new().open_edit(record);
            let draft = fields.apply(view.draft.clone());
            save(api, view.with_draft(draft)).await?;
            writeln!(out, "Updated institution {id}.")?;
        }
        Command::Delete { id, yes } => {
            if !yes && !actions::confirm_delete(confirm, id) {
                writeln!(out, "Cancelled.")?;
                return Ok(());
            }
            let view = InstitutionsView::new().apply(actions::remove(api, id).await);
            ensure_ok(&view)?;
            writeln!(
                out,
                "Deleted institution {id}. {} institutions on file.",
                view.institutions.len()
            )?;
        }
        Command::Dashboard => write_dashboard(out)?,
        Command::Applications { command } => {
            applications::execute(api, confirm, command, out).await?
        }
    }
    Ok(())
}

async fn save<A>(api: &A, view: InstitutionsView) -> Result<InstitutionsView, CliError>
where
    A: InstitutionApi + ?Sized,
{
    let missing = view.draft.missing_required();
    if !missing.is_empty() {
        return Err(CliError::MissingFields(
            missing
                .iter()
                .map(|f| f.label())
                .collect::<Vec<_>>()
                .join(", "),
        ));
    }
    let view = actions::submit(api, view).await;
    ensure_ok(&view)?;
    Ok(view)
}

fn ensure_ok(view: &InstitutionsView) -> Result<(), CliError> {
    match &view.last_error {
        Some(e) => Err(CliError::Request(e.clone())),
        None => Ok(()),
    }
}

fn status_label(record: &MedicalInstitution) -> &'static str {
    if record.is_active() {
        "Active"
    } else {
        "Inactive"
    }
}

fn write_table<W: Write>(out: &mut W, rows: &[MedicalInstitution]) -> Result<(), CliError> {
    writeln!(
        out,
        "{:<6} {:<10} {:<36} {:<16} {:<20} {}",
        "ID", "CODE", "NAME", "TYPE", "REPRESENTATIVE", "STATUS"
    )?;
    for r in rows {
        writeln!(
            out,
            "{:<6} {:<10} {:<36} {:<16} {:<20} {}",
            r.id,
            r.institution_code,
            r.institution_name,
            r.institution_type,
            r.representative_name,
            status_label(r)
        )?;
    }
    if rows.is_empty() {
        writeln!(out, "(no institutions)")?;
    }
    Ok(())
}

fn write_dashboard<W: Write>(out: &mut W) -> Result<(), CliError> {
    writeln!(out, "{DASHBOARD_TITLE}")?;
    writeln!(out, "{DASHBOARD_SUBTITLE}")?;
    writeln!(out)?;
    for stat in STATS {
        let arrow = match stat.trend {
            Trend::Positive => "up",
            Trend::Negative => "down",
        };
        writeln!(
            out,
            "  {:<28} {:>8}  {} ({})",
            stat.name, stat.value, stat.change, arrow
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Recent applications")?;
    for app in RECENT_APPLICATIONS {
        writeln!(
            out,
            "  {}  {:<34} {:<22} {:<14} {}",
            app.number,
            app.institution,
            app.application_type,
            app.status.label(),
            app.submitted_on
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use institution_core::api::AssumeYes;
    use institution_core::application::STATUS_APPROVED;
    use institution_core::error::ApiError;
    use institution_core::memory::InMemoryApi;

    struct Decline;

    impl Confirm for Decline {
        fn confirm(&self, _message: &str) -> bool {
            false
        }
    }

    fn run(api: &InMemoryApi, confirm: &dyn Confirm, command: Command) -> (Result<(), CliError>, String) {
        let mut out = Vec::new();
        let result = block_on(execute(api, confirm, command, &mut out));
        (result, String::from_utf8(out).expect("utf8"))
    }

    fn full_args(code: &str) -> InstitutionArgs {
        InstitutionArgs {
            code: Some(code.into()),
            name: Some("Shibuya Eye Clinic".into()),
            institution_type: Some(InstitutionType::Clinic),
            address: Some("2-2 Shibuya".into()),
            representative: Some("Tanaka".into()),
            license: Some("L-555".into()),
            ..InstitutionArgs::default()
        }
    }

    #[test]
    fn list_filters_by_query() {
        let api = InMemoryApi::with_demo_data();
        let (result, out) = run(
            &api,
            &AssumeYes,
            Command::List {
                query: Some("tokyo".into()),
                status: None,
            },
        );
        result.expect("list");
        assert!(out.contains("Tokyo General Hospital"));
        assert!(!out.contains("Ginza Pharmacy"));
    }

    #[test]
    fn list_reports_unreachable_backend() {
        let api = InMemoryApi::new();
        api.fail_with(ApiError::Transport("network unreachable".into()));
        let (result, _) = run(
            &api,
            &AssumeYes,
            Command::List {
                query: None,
                status: None,
            },
        );
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "request failed: network unreachable");
    }

    #[test]
    fn create_posts_and_reloads() {
        let api = InMemoryApi::with_demo_data();
        let (result, out) = run(&api, &AssumeYes, Command::Create(full_args("C010")));
        result.expect("create");
        assert!(out.contains("4 institutions"), "{out}");

        let created = api
            .snapshot()
            .into_iter()
            .find(|i| i.institution_code == "C010")
            .expect("created");
        assert_eq!(created.institution_type, "Clinic");
        let methods: Vec<_> = api.requests().iter().map(|r| r.method).collect();
        assert_eq!(methods, ["POST", "GET"]);
    }

    #[test]
    fn create_without_required_fields_sends_nothing() {
        let api = InMemoryApi::with_demo_data();
        let args = InstitutionArgs {
            code: Some("X1".into()),
            ..InstitutionArgs::default()
        };
        let (result, _) = run(&api, &AssumeYes, Command::Create(args));
        match result {
            Err(CliError::MissingFields(fields)) => {
                assert!(fields.contains("Institution name"), "{fields}")
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }
        assert!(api.requests().is_empty());
    }

    #[test]
    fn update_keeps_unset_fields() {
        let api = InMemoryApi::with_demo_data();
        let args = InstitutionArgs {
            phone: Some("03-0000-0000".into()),
            ..InstitutionArgs::default()
        };
        let (result, _) = run(&api, &AssumeYes, Command::Update { id: 1, fields: args });
        result.expect("update");

        let record = api.snapshot().into_iter().find(|i| i.id == 1).expect("record");
        assert_eq!(record.phone.as_deref(), Some("03-0000-0000"));
        assert_eq!(record.institution_name, "Tokyo General Hospital");
    }

    #[test]
    fn update_of_unknown_id_fails() {
        let api = InMemoryApi::with_demo_data();
        let (result, _) = run(
            &api,
            &AssumeYes,
            Command::Update {
                id: 99,
                fields: InstitutionArgs::default(),
            },
        );
        assert!(matches!(result, Err(CliError::Api(ApiError::NotFound(_)))));
    }

    #[test]
    fn declined_delete_leaves_registry_alone() {
        let api = InMemoryApi::with_demo_data();
        let (result, out) = run(&api, &Decline, Command::Delete { id: 1, yes: false });
        result.expect("delete");
        assert_eq!(out.trim(), "Cancelled.");
        assert!(api.requests().is_empty());
        assert_eq!(api.snapshot().len(), 3);
    }

    #[test]
    fn delete_with_yes_skips_prompt() {
        let api = InMemoryApi::with_demo_data();
        let (result, out) = run(&api, &Decline, Command::Delete { id: 2, yes: true });
        result.expect("delete");
        assert!(out.contains("2 institutions"), "{out}");
        assert!(api.snapshot().iter().all(|i| i.id != 2));
    }

    #[test]
    fn lookup_prints_camel_case_json() {
        let api = InMemoryApi::with_demo_data();
        let (result, out) = run(&api, &AssumeYes, Command::Lookup { code: "P003".into() });
        result.expect("lookup");
        let value: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(value["institutionName"], "Ginza Pharmacy");
    }

    #[test]
    fn dashboard_prints_stats_and_applications() {
        let api = InMemoryApi::new();
        let (result, out) = run(&api, &AssumeYes, Command::Dashboard);
        result.expect("dashboard");
        assert!(out.contains("1,234"));
        assert!(out.contains("APP-12345678"));
        assert!(api.requests().is_empty());
    }

    #[test]
    fn applications_subcommand_runs_the_workflow() {
        let api = InMemoryApi::with_demo_data();
        let (result, _) = run(
            &api,
            &AssumeYes,
            Command::Applications {
                command: ApplicationCommand::Approve { id: 1 },
            },
        );
        result.expect("approve");
        assert_eq!(api.applications()[0].status, STATUS_APPROVED);
        assert_eq!(api.requests()[0].path, "/api/applications/1/approve");
    }

    #[test]
    fn declined_application_delete_sends_nothing() {
        let api = InMemoryApi::with_demo_data();
        let (result, out) = run(
            &api,
            &Decline,
            Command::Applications {
                command: ApplicationCommand::Delete { id: 2, yes: false },
            },
        );
        result.expect("delete");
        assert_eq!(out.trim(), "Cancelled.");
        assert!(api.requests().is_empty());
        assert_eq!(api.applications().len(), 2);
    }
}
