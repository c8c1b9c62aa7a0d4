#![forbid(unsafe_code)]
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use nightroster::{
    export, io,
    model::{DoctorId, Month},
    scheduler::{RosterError, Scheduler, SolveOptions},
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de planning MICU (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du board (registre + soumissions + rosters)
    #[arg(long, global = true, default_value = "board.json")]
    board: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Enregistrer un médecin
    AddDoctor {
        #[arg(long)]
        name: String,
        #[arg(long)]
        initials: String,
    },

    /// Lister les médecins (actifs par défaut)
    Doctors {
        #[arg(long)]
        all: bool,
    },

    /// Désactiver un médecin (soft delete)
    Deactivate {
        #[arg(long)]
        initials: String,
    },

    /// Réactiver un médecin
    Activate {
        #[arg(long)]
        initials: String,
    },

    /// Importer des médecins depuis un CSV (`name,initials`)
    ImportDoctors {
        #[arg(long)]
        csv: String,
    },

    /// Soumettre les préférences d'un médecin pour un mois
    Submit {
        #[arg(long)]
        doctor: String,
        /// YYYY-MM
        #[arg(long)]
        month: String,
        /// dates YYYY-MM-DD séparées par des virgules
        #[arg(long)]
        unavailable: Option<String>,
        #[arg(long)]
        preferred: Option<String>,
        #[arg(long)]
        desired_shifts: i64,
    },

    /// Lister les soumissions d'un mois
    Preferences {
        #[arg(long)]
        month: String,
    },

    /// Générer le roster du mois (écrase le roster existant, edits compris)
    Generate {
        #[arg(long)]
        month: String,
        /// désactive la règle anti-nuits-consécutives
        #[arg(long)]
        allow_back_to_back: bool,
    },

    /// Afficher le roster d'un mois, optionnellement exporter en CSV
    Schedule {
        #[arg(long)]
        month: String,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Patch manuel d'une date (omettre --doctor pour libérer la date)
    Edit {
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long)]
        doctor: Option<String>,
    },

    /// Export ICS des gardes d'un médecin
    ExportIcs {
        #[arg(long)]
        month: String,
        #[arg(long)]
        doctor: String,
        #[arg(long)]
        out: String,
    },

    /// Rapport imprimable du mois (roster + couverture par médecin)
    Report {
        #[arg(long)]
        month: String,
        #[arg(long)]
        out: Option<String>,
    },

    /// Vérifier les invariants du roster stocké
    Check {
        #[arg(long)]
        month: String,
    },
}

fn parse_month(s: &str) -> Result<Month> {
    s.parse::<Month>()
        .map_err(|_| RosterError::InvalidMonth(s.to_string()).into())
}

fn parse_dates(list: Option<&str>) -> Result<Vec<NaiveDate>> {
    let Some(list) = list else {
        return Ok(Vec::new());
    };
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| anyhow!("invalid date: {s}"))
        })
        .collect()
}

fn resolve_doctor(scheduler: &Scheduler, initials: &str) -> Result<DoctorId> {
    scheduler
        .board()
        .find_doctor_by_initials(initials)
        .map(|d| d.id.clone())
        .ok_or_else(|| anyhow!("unknown doctor initials: {initials}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.board)?;
    let mut scheduler = Scheduler::new();
    *scheduler.board_mut() = storage.load_or_default()?;

    let code = match cli.cmd {
        Commands::AddDoctor { name, initials } => {
            let id = scheduler.add_doctor(&name, &initials)?;
            storage.save(scheduler.board())?;
            println!("{} | {} | {}", id.as_str(), initials, name);
            0
        }
        Commands::Doctors { all } => {
            for d in &scheduler.board().doctors {
                if !all && !d.active {
                    continue;
                }
                let state = if d.active { "active" } else { "inactive" };
                println!("{} | {} | {} | {}", d.id.as_str(), d.initials, d.name, state);
            }
            0
        }
        Commands::Deactivate { initials } => {
            let id = resolve_doctor(&scheduler, &initials)?;
            scheduler.deactivate_doctor(&id)?;
            storage.save(scheduler.board())?;
            0
        }
        Commands::Activate { initials } => {
            let id = resolve_doctor(&scheduler, &initials)?;
            scheduler.activate_doctor(&id)?;
            storage.save(scheduler.board())?;
            0
        }
        Commands::ImportDoctors { csv } => {
            let rows = io::import_doctors_csv(csv)?;
            for row in rows {
                scheduler.add_doctor(&row.name, &row.initials)?;
            }
            storage.save(scheduler.board())?;
            0
        }
        Commands::Submit {
            doctor,
            month,
            unavailable,
            preferred,
            desired_shifts,
        } => {
            let month = parse_month(&month)?;
            let id = resolve_doctor(&scheduler, &doctor)?;
            let unavailable = parse_dates(unavailable.as_deref())?;
            let preferred = parse_dates(preferred.as_deref())?;
            scheduler.submit_preference(&id, month, &unavailable, &preferred, desired_shifts)?;
            storage.save(scheduler.board())?;
            0
        }
        Commands::Preferences { month } => {
            let month = parse_month(&month)?;
            for p in scheduler.board().preferences_for_month(month) {
                let initials = scheduler
                    .board()
                    .find_doctor(&p.doctor_id)
                    .map(|d| d.initials.as_str())
                    .unwrap_or("??");
                println!(
                    "{} | desired {} | unavailable {} | preferred {}",
                    initials,
                    p.desired_shifts,
                    p.unavailable.len(),
                    p.preferred.len()
                );
            }
            0
        }
        Commands::Generate {
            month,
            allow_back_to_back,
        } => {
            let month = parse_month(&month)?;
            let opts = SolveOptions {
                avoid_back_to_back: !allow_back_to_back,
            };
            let outcome = scheduler.generate(month, opts)?;
            storage.save(scheduler.board())?;
            let uncovered = outcome.uncovered();
            if uncovered.is_empty() {
                println!("OK: every date covered");
                0
            } else {
                eprintln!("{} uncovered date(s):", uncovered.len());
                for date in uncovered {
                    eprintln!("  {date}");
                }
                // code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Schedule { month, out_csv } => {
            let month = parse_month(&month)?;
            if let Some(path) = out_csv {
                io::export_schedule_csv(path, scheduler.board(), month)?;
            }
            let roster = scheduler
                .roster(month)
                .ok_or_else(|| anyhow!("no roster generated for {month}"))?;
            for (date, id) in &roster.cells {
                let initials = scheduler
                    .board()
                    .find_doctor(id)
                    .map(|d| d.initials.as_str())
                    .unwrap_or("??");
                println!("{date} | {initials}");
            }
            0
        }
        Commands::Edit { date, doctor } => {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|_| anyhow!("invalid date: {date}"))?;
            let doctor = doctor
                .map(|ini| resolve_doctor(&scheduler, &ini))
                .transpose()?;
            scheduler.override_assignment(date, doctor)?;
            storage.save(scheduler.board())?;
            0
        }
        Commands::ExportIcs { month, doctor, out } => {
            let month = parse_month(&month)?;
            let ics = export::doctor_ics(scheduler.board(), month, &doctor)?;
            std::fs::write(&out, ics)?;
            println!("ICS written to {out}");
            0
        }
        Commands::Report { month, out } => {
            let month = parse_month(&month)?;
            let report = export::month_report(scheduler.board(), month)?;
            match out {
                Some(path) => std::fs::write(&path, report)?,
                None => print!("{report}"),
            }
            0
        }
        Commands::Check { month } => {
            let month = parse_month(&month)?;
            let violations = scheduler.audit(month)?;
            if violations.is_empty() {
                println!("OK: no violations");
                0
            } else {
                eprintln!("Found {} violation(s)", violations.len());
                for v in &violations {
                    eprintln!("  {} | {} | {:?}", v.date, v.doctor.as_str(), v.kind);
                }
                2
            }
        }
    };

    std::process::exit(code);
}
