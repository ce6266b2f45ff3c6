use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use medialib_core::{
    adapters::{API_KEYS, EntityAdapter, FILES, LISTS, PRESETS, SOURCES, TAGS},
    config::ConfigLoader,
    pagination::{ListingParams, PaginationState, Paginator, TokenCodec, resolve_state},
};
use medialib_model::{EntityKind, SortField};
use serde_json::{Value, json};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "medialib-token", about = "Inspect and mint medialib pagination tokens")]
struct Cli {
    /// Configuration file (defaults to medialib.toml lookup)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Dotenv file to load instead of `.env`
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a token and print the cursor it carries as JSON
    Inspect {
        #[arg(long)]
        entity: EntityKind,
        token: String,
    },
    /// Print a first-page token for an entity
    Mint {
        #[arg(long)]
        entity: EntityKind,
        /// Sort field name (`created_at`) or ordinal; the entity default when omitted
        #[arg(long)]
        order: Option<String>,
        #[arg(long)]
        desc: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = cli.config {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = cli.env_file {
        loader = loader.with_env_file(path);
    }
    let load = loader.load().context("failed to load configuration")?;
    for warning in &load.warnings.items {
        match &warning.hint {
            Some(hint) => warn!(hint = %hint, "{}", warning.message),
            None => warn!("{}", warning.message),
        }
    }

    let paginator = Paginator::from_config(&load.config.pagination)
        .context("failed to derive the pagination token key")?;
    let codec = paginator.codec();

    let output = match cli.command {
        Command::Inspect { entity, token } => match entity {
            EntityKind::Files => inspect(codec, &FILES, &token),
            EntityKind::Tags => inspect(codec, &TAGS, &token),
            EntityKind::ApiKeys => inspect(codec, &API_KEYS, &token),
            EntityKind::Presets => inspect(codec, &PRESETS, &token),
            EntityKind::Lists => inspect(codec, &LISTS, &token),
            EntityKind::Sources => inspect(codec, &SOURCES, &token),
        }?,
        Command::Mint {
            entity,
            order,
            desc,
        } => {
            let order = order.as_deref();
            match entity {
                EntityKind::Files => mint(codec, &FILES, order, desc),
                EntityKind::Tags => mint(codec, &TAGS, order, desc),
                EntityKind::ApiKeys => mint(codec, &API_KEYS, order, desc),
                EntityKind::Presets => mint(codec, &PRESETS, order, desc),
                EntityKind::Lists => mint(codec, &LISTS, order, desc),
                EntityKind::Sources => mint(codec, &SOURCES, order, desc),
            }?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn inspect<S: SortField, R>(
    codec: &TokenCodec,
    adapter: &EntityAdapter<S, R>,
    token: &str,
) -> Result<Value> {
    let state = codec
        .decode(adapter, token)
        .with_context(|| format!("token is not a valid {} cursor", adapter.kind))?;
    Ok(describe(adapter, &state))
}

/// Sort ordinal for `raw`, given either as a field name or as its ordinal.
fn parse_order<S: SortField>(raw: &str) -> Result<i32> {
    if let Ok(ordinal) = raw.trim().parse::<i32>() {
        return Ok(ordinal);
    }
    S::from_name(raw.trim()).map(S::ordinal).ok_or_else(|| {
        let known: Vec<&str> = S::ALL.iter().map(|field| field.name()).collect();
        anyhow!("unknown sort field {raw:?}, expected one of {}", known.join(", "))
    })
}

fn mint<S: SortField, R>(
    codec: &TokenCodec,
    adapter: &EntityAdapter<S, R>,
    order: Option<&str>,
    descending: bool,
) -> Result<Value> {
    let params = ListingParams {
        order: order.map(parse_order::<S>).transpose()?,
        order_desc: Some(descending),
        ..ListingParams::default()
    };
    let state = resolve_state(codec, adapter, &params)?;
    let token = codec
        .encode(adapter, &state)
        .context("failed to encode first-page cursor")?;
    let mut described = describe(adapter, &state);
    described["token"] = Value::String(token);
    Ok(described)
}

fn describe<S: SortField, R>(adapter: &EntityAdapter<S, R>, state: &PaginationState<S>) -> Value {
    let column = adapter.column(state.sort);
    json!({
        "entity": adapter.kind.as_str(),
        "sort": state.sort.name(),
        "ordinal": state.sort.ordinal(),
        "column": column.column,
        "valueType": column.value_type.to_string(),
        "descending": state.descending,
        "previous": state.previous,
        "boundary": state.boundary.as_ref().map(|boundary| json!({
            "id": boundary.id,
            "value": boundary.value.to_string(),
        })),
    })
}
