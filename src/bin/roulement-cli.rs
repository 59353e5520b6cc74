#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::Local;
use roulement::{
    io,
    model::{Event, Roster},
    report::{PlanRenderer, TextPlan},
    rng::{OrderedTieBreak, SeededTieBreak, TieBreak},
    scheduler::{self, PlanError},
    storage::{JsonStorage, Storage},
};
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de répartition des chauffeurs et de la lessive
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    cmd: Commands,
}

/// Entrées communes : roster (CSV ou plan précédent) et matchs
#[derive(Args, Debug)]
struct Inputs {
    /// CSV `name,trip_count,wash_count`
    #[arg(long, conflicts_with = "from_plan", required_unless_present = "from_plan")]
    people: Option<String>,
    /// Reprendre le roster final d'un plan JSON précédent
    #[arg(long)]
    from_plan: Option<String>,
    /// CSV `date,start_time,opponent,venue,assembly_time,drivers_needed`
    #[arg(long)]
    events: String,
}

impl Inputs {
    fn load(&self) -> Result<(Roster, Vec<Event>)> {
        let roster = match (&self.people, &self.from_plan) {
            (Some(csv), _) => io::import_roster_csv(csv)
                .with_context(|| format!("importing roster {csv}"))?,
            (None, Some(path)) => JsonStorage::open(path)?.load()?.roster,
            (None, None) => bail!("either --people or --from-plan is required"),
        };
        let events = io::import_events_csv(&self.events)
            .with_context(|| format!("importing events {}", self.events))?;
        Ok((roster, events))
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculer le planning complet
    Plan {
        #[command(flatten)]
        inputs: Inputs,
        /// Graine du tirage (rejouer un planning)
        #[arg(long, conflicts_with = "ordered")]
        seed: Option<u64>,
        /// Départage déterministe : premier dans l'ordre du roster
        #[arg(long)]
        ordered: bool,
        /// Dossier de sortie des CSV datés
        #[arg(long)]
        out_dir: Option<String>,
        /// Sauvegarde JSON du plan (atomique)
        #[arg(long)]
        save: Option<String>,
        /// Export JSON simple du plan
        #[arg(long)]
        out_json: Option<String>,
    },

    /// Vérifier les entrées sans tirer
    Check {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// Afficher un plan sauvegardé
    Show {
        #[arg(long)]
        plan: String,
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

    let code = match cli.cmd {
        Commands::Plan {
            inputs,
            seed,
            ordered,
            out_dir,
            save,
            out_json,
        } => {
            let (roster, events) = inputs.load()?;
            let mut tie_break: Box<dyn TieBreak> = match (ordered, seed) {
                (true, _) => Box::new(OrderedTieBreak),
                (false, Some(seed)) => Box::new(SeededTieBreak::new(seed)),
                (false, None) => Box::new(SeededTieBreak::from_entropy()),
            };
            let plan = scheduler::run(&roster, &events, &mut tie_break)?;

            if let Some(dir) = out_dir {
                let files = io::write_output_dir(&dir, &plan, Local::now().date_naive())?;
                eprintln!("Planning saved to {}", files.planning.display());
            }
            if let Some(path) = save {
                JsonStorage::open(&path)?.save(&plan)?;
            }
            if let Some(path) = out_json {
                io::export_plan_json(path, &plan)?;
            }
            print!("{}", TextPlan.render(&plan));
            if let Some(seed) = plan.seed {
                eprintln!("seed: {seed}");
            }
            0
        }
        Commands::Check { inputs } => {
            let checked = inputs.load().and_then(|(roster, events)| {
                scheduler::preflight(&roster, &events)?;
                Ok((roster.len(), events.len()))
            });
            match checked {
                Ok((people, events)) => {
                    println!("OK: {people} people, {events} events");
                    0
                }
                Err(e) => match e.chain().find_map(|c| c.downcast_ref::<PlanError>()) {
                    Some(plan_err) => {
                        eprintln!("error: {plan_err}");
                        // Code 2 = entrées inutilisables
                        2
                    }
                    None => return Err(e),
                },
            }
        }
        Commands::Show { plan } => {
            let plan = JsonStorage::open(&plan)?.load()?;
            print!("{}", TextPlan.render(&plan));
            0
        }
    };

    std::process::exit(code);
}
