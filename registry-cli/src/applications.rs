use crate::error::CliError;
use clap::Subcommand;
use institution_core::api::{ApplicationApi, Confirm, APPLICATION_DELETE_PROMPT};
use institution_core::application::{
    self, Application, ApplicationFilter, ApplicationPayload, Transition,
};
use std::io::Write;

#[derive(Debug, Subcommand)]
pub enum ApplicationCommand {
    /// List applications, optionally by one key
    List {
        #[arg(long, conflicts_with_all = ["application_type", "institution"])]
        status: Option<String>,
        #[arg(long = "type", conflicts_with = "institution")]
        application_type: Option<String>,
        /// Institution id
        #[arg(long)]
        institution: Option<i64>,
    },
    /// Print one application as JSON
    Show { id: i64 },
    /// Find an application by its number (APP-...)
    Lookup { number: String },
    /// File a new draft application
    Create {
        /// Institution id
        #[arg(long)]
        institution: i64,
        #[arg(long = "type")]
        application_type: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Submit a draft for review
    Submit { id: i64 },
    /// Approve a submitted application
    Approve { id: i64 },
    /// Reject a submitted application
    Reject {
        id: i64,
        #[arg(long)]
        reason: String,
    },
    /// Delete an application
    Delete {
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },
}

impl ApplicationCommand {
    fn filter(status: Option<String>, kind: Option<String>, institution: Option<i64>) -> ApplicationFilter {
        match (status, kind, institution) {
            (Some(status), _, _) => ApplicationFilter::Status(status),
            (None, Some(kind), _) => ApplicationFilter::Type(kind),
            (None, None, Some(id)) => ApplicationFilter::Institution(id),
            (None, None, None) => ApplicationFilter::All,
        }
    }
}

pub async fn execute<A, C, W>(
    api: &A,
    confirm: &C,
    command: ApplicationCommand,
    out: &mut W,
) -> Result<(), CliError>
where
    A: ApplicationApi + ?Sized,
    C: Confirm + ?Sized,
    W: Write,
{
    match command {
        ApplicationCommand::List {
            status,
            application_type,
            institution,
        } => {
            let filter = ApplicationCommand::filter(status, application_type, institution);
            let rows = application::list_applications(api, &filter).await?;
            write_table(out, &rows)?;
        }
        ApplicationCommand::Show { id } => {
            write_json(out, &api.get_application(id).await?)?;
        }
        ApplicationCommand::Lookup { number } => {
            write_json(out, &api.find_application_by_number(&number).await?)?;
        }
        ApplicationCommand::Create {
            institution,
            application_type,
            title,
            description,
        } => {
            let payload = ApplicationPayload {
                institution_id: institution,
                application_type,
                title,
                description,
            };
            let created = api.create_application(&payload).await?;
            tracing::info!("Filed application {}", created.application_number);
            write_json(out, &created)?;
        }
        ApplicationCommand::Submit { id } => {
            write_json(out, &application::advance(api, id, Transition::Submit, "").await?)?;
        }
        ApplicationCommand::Approve { id } => {
            write_json(out, &application::advance(api, id, Transition::Approve, "").await?)?;
        }
        ApplicationCommand::Reject { id, reason } => {
            write_json(out, &application::advance(api, id, Transition::Reject, &reason).await?)?;
        }
        ApplicationCommand::Delete { id, yes } => {
            if !yes && !confirm.confirm(APPLICATION_DELETE_PROMPT) {
                writeln!(out, "Cancelled.")?;
                return Ok(());
            }
            api.delete_application(id).await?;
            writeln!(out, "Deleted application {id}.")?;
        }
    }
    Ok(())
}

fn write_json<W: Write>(out: &mut W, application: &Application) -> Result<(), CliError> {
    writeln!(out, "{}", serde_json::to_string_pretty(application)?)?;
    Ok(())
}

fn write_table<W: Write>(out: &mut W, rows: &[Application]) -> Result<(), CliError> {
    writeln!(
        out,
        "{:<6} {:<14} {:<12} {:<28} {:<32} {}",
        "ID", "NUMBER", "INSTITUTION", "TYPE", "TITLE", "STATUS"
    )?;
    for a in rows {
        let institution = a.institution_id.map(|id| id.to_string()).unwrap_or_default();
        writeln!(
            out,
            "{:<6} {:<14} {:<12} {:<28} {:<32} {}",
            a.id, a.application_number, institution, a.application_type, a.title, a.status
        )?;
    }
    if rows.is_empty() {
        writeln!(out, "(no applications)")?;
    }
    Ok(())
}
