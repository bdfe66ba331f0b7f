#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use gardes::{
    config::{export_config_json, load_config_from_file, ScheduleConfig},
    io,
    model::{Roster, SkipSet},
    report::{ScheduleRenderer, TextRenderer},
    scheduler::{SchedError, ScheduleOptions, Scheduler, WeekendBoundary},
    stats::summarize,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de répartition des gardes semaine / week-end
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Afficher les créneaux générés, sans assignation
    Slots {
        /// MM/DD/YYYY ou YYYY-MM-DD
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        /// CSV d'entrée (seuls les jours fériés sont utilisés)
        #[arg(long)]
        input: Option<String>,
        /// Ne pas émettre un week-end qui dépasse `end`
        #[arg(long)]
        contain_weekends: bool,
    },

    /// Vérifier un CSV d'entrée et afficher l'équipe
    Check {
        #[arg(long)]
        input: String,
    },

    /// Générer et assigner le planning
    Schedule {
        #[arg(long)]
        input: String,
        /// Fichier JSON de paramètres
        #[arg(long)]
        config: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        contain_weekends: bool,
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        stats_csv: Option<String>,
    },

    /// Écrire un fichier de paramètres de départ
    InitConfig {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long)]
        out: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let renderer = TextRenderer;

    let code = match cli.cmd {
        Commands::Slots {
            start,
            end,
            input,
            contain_weekends,
        } => {
            let skip = match input {
                Some(path) => load_inputs(&path)?.1,
                None => SkipSet::new(),
            };
            let scheduler = Scheduler::with_inputs(Roster::new(), skip)
                .options(options(WeekendBoundary::default(), contain_weekends));
            let slots = scheduler.generate(parse_date_arg(&start)?, parse_date_arg(&end)?)?;
            print!("{}", renderer.schedule(&slots));
            0
        }
        Commands::Check { input } => {
            let (roster, skip) = load_inputs(&input)?;
            println!("Input data summary:");
            for p in roster.people() {
                println!("\t{}", renderer.person(p));
            }
            println!("Skipped days: {}", skip.len());
            0
        }
        Commands::Schedule {
            input,
            config,
            start,
            end,
            contain_weekends,
            out_csv,
            out_json,
            stats_csv,
        } => {
            let (mut roster, mut skip) = load_inputs(&input)?;
            let mut cfg = match config {
                Some(path) => Some(load_config_from_file(path)?),
                None => None,
            };
            let start = match (start, cfg.as_ref()) {
                (Some(raw), _) => parse_date_arg(&raw)?,
                (None, Some(c)) => c.start,
                (None, None) => bail!("--start is required without --config"),
            };
            let end = match (end, cfg.as_ref()) {
                (Some(raw), _) => parse_date_arg(&raw)?,
                (None, Some(c)) => c.end,
                (None, None) => bail!("--end is required without --config"),
            };
            let boundary = match cfg.as_mut() {
                Some(c) => {
                    c.start = start;
                    c.end = end;
                    c.validate()?;
                    c.apply(&mut roster, &mut skip)?;
                    c.weekend_boundary
                }
                None => WeekendBoundary::default(),
            };

            let mut scheduler = Scheduler::with_inputs(roster, skip)
                .options(options(boundary, contain_weekends));
            let slots = match scheduler.run(start, end) {
                Ok(slots) => slots,
                Err(err @ SchedError::NoEligiblePerson { .. }) => {
                    eprintln!("Error: {err}");
                    // Code 2 = planning impossible avec ces contraintes
                    std::process::exit(2);
                }
                Err(err) => return Err(err.into()),
            };
            let summary = summarize(&slots);

            print!("{}", renderer.schedule(&slots));
            println!("\nStats across everyone:");
            print!("{}", renderer.summary(&summary));

            if let Some(path) = out_csv {
                io::export_slots_csv(path, &slots)?;
            }
            if let Some(path) = stats_csv {
                io::export_stats_csv(path, &summary)?;
            }
            if let Some(path) = out_json {
                io::export_schedule_json(path, &slots, &summary)?;
            }
            0
        }
        Commands::InitConfig { start, end, out } => {
            let cfg = ScheduleConfig::new(parse_date_arg(&start)?, parse_date_arg(&end)?);
            cfg.validate()?;
            export_config_json(&out, &cfg)?;
            println!("Config written to {out}");
            0
        }
    };

    std::process::exit(code);
}

fn load_inputs(path: &str) -> Result<(Roster, SkipSet)> {
    let records = io::import_records_csv(path)?;
    let inputs = io::ingest(&records).with_context(|| format!("loading {path}"))?;
    Ok(inputs)
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate> {
    io::parse_date(raw).map_err(anyhow::Error::msg)
}

fn options(boundary: WeekendBoundary, contain: bool) -> ScheduleOptions {
    ScheduleOptions {
        weekend_boundary: if contain {
            WeekendBoundary::Contain
        } else {
            boundary
        },
    }
}
