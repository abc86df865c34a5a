use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use msd_cli::selection::{SelectionArgs, build_selection};
use msd_cli::settings::{Settings, save_settings, settings_path};
use msd_core::{
    ApplyError, ApplyPlan, ApplyReport, ApplyRequest, ExecutionFailure, FieldCatalog,
    MetadataRepository, ReconcileMode, ValidationOutcome, apply_selection, filter_collections,
    list_collections,
};
use msd_remote::GraphQlRepository;

use crate::cli::{CollectionsArgs, ConfigAction, ConfigArgs, CopyArgs, FieldsArgs};
use crate::summary::{print_collections, print_fields};

/// How a `copy` run ended.
pub enum CopyResult {
    /// The selection failed validation; nothing was planned.
    Invalid(ValidationOutcome),
    /// The plan was built and, unless dry-running, fully applied.
    Completed {
        destination: String,
        plan: ApplyPlan,
        report: Option<ApplyReport>,
    },
    /// Execution stopped part-way.
    Failed(ExecutionFailure),
}

impl CopyResult {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Completed { .. } => 0,
            Self::Failed(_) => 1,
            Self::Invalid(_) => 2,
        }
    }
}

pub fn connect(settings: &Settings) -> Result<GraphQlRepository> {
    GraphQlRepository::connect(&settings.remote).context("connect to metadata service")
}

pub async fn run_collections<R>(repo: &R, args: &CollectionsArgs) -> Result<()>
where
    R: MetadataRepository + ?Sized,
{
    let collections = list_collections(repo).await.context("list libraries")?;
    let shown = match &args.search {
        Some(query) => filter_collections(&collections, query),
        None => collections.iter().collect(),
    };
    print_collections(&shown);
    Ok(())
}

pub async fn run_fields<R>(repo: &R, args: &FieldsArgs) -> Result<()>
where
    R: MetadataRepository + ?Sized,
{
    let catalog = FieldCatalog::load(repo, &args.collection)
        .await
        .with_context(|| format!("load fields of {}", args.collection))?;
    let shown = match &args.search {
        Some(query) => catalog.filter(query),
        None => catalog.iter().collect(),
    };
    print_fields(&shown);
    Ok(())
}

pub async fn run_copy<R>(repo: &R, settings: &Settings, args: &CopyArgs) -> Result<CopyResult>
where
    R: MetadataRepository + ?Sized,
{
    let destination = args
        .to
        .clone()
        .or_else(|| settings.default_destination.clone())
        .context("no destination; pass --to or set one with `msd config set-destination`")?;

    let catalog = FieldCatalog::load(repo, &args.from)
        .await
        .with_context(|| format!("load fields of {}", args.from))?;
    let selection = build_selection(
        &catalog,
        &SelectionArgs {
            fields: &args.fields,
            all: args.all,
            exclusions: &args.exclude_options,
        },
    )?;

    let mode = if args.create_new {
        ReconcileMode::CreateNew
    } else {
        settings.apply.mode()
    };
    info!(
        source = %args.from,
        destination = %destination,
        fields = selection.selected_ids().len(),
        "Copying fields"
    );

    let request = ApplyRequest::new(&destination, &catalog, &selection)
        .with_mode(mode)
        .with_dry_run(args.dry_run);
    match apply_selection(repo, &request).await {
        Ok(outcome) => Ok(CopyResult::Completed {
            destination,
            plan: outcome.plan,
            report: outcome.report,
        }),
        Err(ApplyError::Validation { field_names }) => {
            Ok(CopyResult::Invalid(ValidationOutcome::Invalid { field_names }))
        }
        Err(ApplyError::Execution(failure)) => Ok(CopyResult::Failed(failure)),
        Err(error) => Err(error).context("apply selection"),
    }
}

pub fn run_config(settings: &Settings, config_path: Option<&Path>, args: &ConfigArgs) -> Result<()> {
    match &args.action {
        ConfigAction::Show => {
            let path = config_path.map(Path::to_path_buf).or_else(settings_path);
            match path {
                Some(path) => println!("# {}", path.display()),
                None => println!("# (no settings path available)"),
            }
            let mut shown = settings.clone();
            if shown.remote.token.is_some() {
                shown.remote.token = Some("********".to_string());
            }
            print!("{}", toml::to_string_pretty(&shown).context("serialize settings")?);
        }
        ConfigAction::SetDestination { collection } => {
            let mut updated = settings.clone();
            updated.default_destination = Some(collection.clone());
            let path = save_settings(&updated, config_path)?;
            println!("Default destination set to {collection} in {}", path.display());
        }
        ConfigAction::SetEndpoint { url } => {
            let mut updated = settings.clone();
            updated.remote.endpoint = url.clone();
            updated.remote.validate()?;
            let path = save_settings(&updated, config_path)?;
            println!("Endpoint set to {url} in {}", path.display());
        }
    }
    Ok(())
}
