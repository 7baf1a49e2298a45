//! rxcompare: diabetes medication cost comparator CLI
//!
//! Prices medicines under insurance plans and ranks the combinations.
//! Without `--data-dir` the bundled Washington DC dataset is used.
//!
//! Usage:
//!   cargo run -p rxcompare-cli -- compare --medicine Januvia
//!   cargo run -p rxcompare-cli -- compare --insurance Cigna --sort-by savings --order desc
//!   cargo run -p rxcompare-cli -- trial --index 0 --answer yes
//!   cargo run -p rxcompare-cli -- recommend --medicine Januvia --insurance Cigna
//!   cargo run -p rxcompare-cli -- --data-dir ./data info

use std::{error::Error, path::PathBuf, sync::Arc};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use rxcompare_config::ComparatorConfig;
use rxcompare_contracts::{
    request::{ComparisonRequest, SortKey, SortOrder, TrialAnswer, TrialInput},
    view::ComparisonView,
};
use rxcompare_core::{Comparator, DataStore};
use rxcompare_report::render;
use rxcompare_store::{DatasetFingerprint, InMemoryStore};

type CliResult<T> = Result<T, Box<dyn Error>>;

// ── CLI definition ────────────────────────────────────────────────────────────

/// rxcompare: compare what diabetes medicines cost under each insurance plan.
#[derive(Parser)]
#[command(
    name = "rxcompare",
    about = "Diabetes medication cost comparator",
    long_about = "Prices every medicine under every insurance plan, adds the cash-price\n\
                  channel, flags higher formulary tiers, and ranks the results."
)]
struct Cli {
    /// Directory holding medicines.csv, insurance.csv and
    /// insurance_medicine_coverage.csv. Defaults to the bundled dataset.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Comparator TOML. Defaults to the bundled configuration.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct SelectionArgs {
    #[arg(long)]
    medicine: Option<String>,
    #[arg(long)]
    insurance: Option<String>,
    /// The selected medicine has already been tried; flag higher tiers.
    #[arg(long)]
    tried: bool,
    /// annual, monthly, savings, medicine or insurance.
    #[arg(long, default_value = "annual")]
    sort_by: String,
    /// asc or desc.
    #[arg(long, default_value = "asc")]
    order: String,
}

impl SelectionArgs {
    fn to_request(&self) -> ComparisonRequest {
        ComparisonRequest {
            tried: self.tried,
            sort_by: SortKey::parse(&self.sort_by),
            order: SortOrder::parse(&self.order),
            ..ComparisonRequest::for_selection(self.medicine.as_deref(), self.insurance.as_deref())
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Rank pairings for a selection.
    Compare(SelectionArgs),
    /// Step through the "have you already tried" questionnaire.
    Trial {
        /// Index of the question being answered.
        #[arg(long, default_value_t = 0)]
        index: usize,
        /// Answer to the question at --index. Omit to see the first question.
        #[arg(long)]
        answer: Option<String>,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Cost card for one medicine under one plan.
    Current {
        #[arg(long)]
        medicine: String,
        #[arg(long)]
        insurance: String,
    },
    /// Every medicine priced under one plan.
    Medicines {
        #[arg(long)]
        insurance: String,
        #[arg(long)]
        exclude: Option<String>,
    },
    /// Every plan pricing one medicine.
    Plans {
        #[arg(long)]
        medicine: String,
        #[arg(long)]
        exclude: Option<String>,
    },
    /// Cheaper medicines and plans for the current selection.
    Recommend {
        #[arg(long)]
        medicine: String,
        #[arg(long)]
        insurance: String,
    },
    /// Dump every coverage rule.
    CoverageMap,
    /// List medicine and plan names.
    List,
    /// Show the loaded dataset and configuration.
    Info,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for per-request logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

struct Session {
    comparator: Comparator,
    fingerprint: DatasetFingerprint,
    source: String,
}

fn load(cli: &Cli) -> CliResult<Session> {
    let config = match &cli.config {
        Some(path) => ComparatorConfig::from_file(path)?,
        None => rxcompare_ref_data::reference_config()?,
    };

    let (store, source) = match &cli.data_dir {
        Some(dir) => {
            let files = config.data.resolved(dir);
            debug!(medicines = %files.medicines.display(), "loading reference tables");
            let store = InMemoryStore::from_paths(&files.medicines, &files.insurance, &files.coverage)?;
            (store, dir.display().to_string())
        }
        None => (rxcompare_ref_data::reference_store()?, "bundled".to_string()),
    };

    let fingerprint = store.fingerprint().clone();
    let comparator = Comparator::new(Arc::new(store), config.to_settings());
    Ok(Session { comparator, fingerprint, source })
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

fn run(cli: &Cli) -> CliResult<()> {
    let session = load(cli)?;
    let comparator = &session.comparator;

    match &cli.command {
        Command::Compare(selection) => {
            let view = comparator.compare(&selection.to_request());
            emit(cli.json, &view, || print_view(&view))
        }

        Command::Trial { index, answer, selection } => match answer {
            None => {
                let question = comparator.start_trial();
                emit(cli.json, &question, || match &question {
                    Some(q) => println!("{}\n(answer with --index {} --answer yes|no)", render::trial_prompt(q), q.index),
                    None => println!("The trial sequence is empty."),
                })
            }
            Some(raw) => {
                let request = ComparisonRequest {
                    trial: Some(TrialInput {
                        index: *index,
                        answer: TrialAnswer::from_input(raw),
                    }),
                    ..selection.to_request()
                };
                let view = comparator.compare(&request);
                emit(cli.json, &view, || print_view(&view))
            }
        },

        Command::Current { medicine, insurance } => {
            let summary = comparator.current_selection(medicine, insurance).ok_or_else(|| {
                format!("no such medicine/plan pair: '{}' / '{}'", medicine, insurance)
            })?;
            emit(cli.json, &summary, || println!("{}", render::current_selection(&summary)))
        }

        Command::Medicines { insurance, exclude } => {
            let rows = comparator.compare_medicines(insurance, exclude.as_deref())?;
            emit(cli.json, &rows, || {
                println!("Medicine comparison for {}", insurance);
                println!("{}", render::medicine_costs_table(&rows).render());
            })
        }

        Command::Plans { medicine, exclude } => {
            let rows = comparator.compare_insurance_plans(medicine, exclude.as_deref())?;
            emit(cli.json, &rows, || {
                println!("Insurance comparison for {}", medicine);
                println!("{}", render::plan_costs_table(&rows).render());
            })
        }

        Command::Recommend { medicine, insurance } => {
            let recs = comparator.recommend(medicine, insurance)?;
            emit(cli.json, &recs, || println!("{}", render::recommendations(&recs)))
        }

        Command::CoverageMap => {
            let map = comparator.coverage_map();
            emit(cli.json, &map, || println!("{}", render::coverage_map_table(&map).render()))
        }

        Command::List => {
            let store = comparator.store();
            let listing = Listing {
                medicines: store.medicine_names(),
                insurance: store.insurance_names(),
            };
            emit(cli.json, &listing, || {
                println!("Medicines:");
                for name in listing.medicines {
                    println!("  {}", name);
                }
                println!("Insurance plans:");
                for name in listing.insurance {
                    println!("  {}", name);
                }
            })
        }

        Command::Info => {
            let store = comparator.store();
            let settings = comparator.settings();
            let info = Info {
                source: &session.source,
                fingerprint: session.fingerprint.as_str(),
                medicines: store.medicine_names().len(),
                insurance_plans: store.insurance_names().len(),
                coverage_rules: store.coverage_rules().len(),
                unauthorized_costs: settings.unauthorized_costs.len(),
                cash_channel_label: &settings.cash_channel_label,
                trial_sequence: &settings.trial_sequence,
            };
            emit(cli.json, &info, || {
                println!("Data source:        {}", info.source);
                println!("Fingerprint:        {}", info.fingerprint);
                println!("Medicines:          {}", info.medicines);
                println!("Insurance plans:    {}", info.insurance_plans);
                println!("Coverage rules:     {}", info.coverage_rules);
                println!("Overrides:          {}", info.unauthorized_costs);
                println!("Cash channel label: {}", info.cash_channel_label);
                println!("Trial sequence:     {}", info.trial_sequence.join(", "));
            })
        }
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Listing<'a> {
    medicines: &'a [String],
    insurance: &'a [String],
}

#[derive(Serialize)]
struct Info<'a> {
    source: &'a str,
    fingerprint: &'a str,
    medicines: usize,
    insurance_plans: usize,
    coverage_rules: usize,
    unauthorized_costs: usize,
    cash_channel_label: &'a str,
    trial_sequence: &'a [String],
}

/// Print `value` as pretty JSON, or run `text` for the table form.
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce()) -> CliResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        text();
    }
    Ok(())
}

fn print_view(view: &ComparisonView) {
    if let Some(question) = &view.trial_question {
        println!("{}", render::trial_prompt(question));
        println!("(answer with --index {} --answer yes|no)", question.index);
        return;
    }

    if let Some(current) = &view.current {
        println!("{}", render::current_selection(current));
        println!();
        println!("Other plans for {}:", current.medicine.name);
    }

    if view.pairings.is_empty() {
        println!("No pairings match this selection.");
    } else {
        println!("{}", render::pairings_table(&view.pairings).render());
    }
}
