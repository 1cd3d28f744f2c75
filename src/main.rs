use anyhow::Result;
use clap::{Parser, Subcommand};
use futures::executor::block_on;
use std::path::{Path, PathBuf};

use salary_insights::config::{default_comparison_regions, DEFAULT_CATEGORY, DEFAULT_REGION};
use salary_insights::{
    category_label, compare_regions, fetch_cohort_statistics, format_money,
    project_series, submit_link, telemetry, unlock_progress, AppConfig, CohortKey,
    CohortStatistics, ExperienceSegment, NewSubmission, PayKind, SegmentStatistic, SqliteStore,
    DISCLOSURE_THRESHOLD,
};

#[derive(Parser)]
#[command(name = "salary-insights", version, about = "Anonymous salary statistics by region, role and experience")]
struct Cli {
    /// SQLite database file (overrides SALARY_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import submissions from a CSV export
    Import { csv: PathBuf },

    /// Store one anonymous submission
    Submit {
        #[arg(long, default_value = DEFAULT_REGION)]
        region: String,
        #[arg(long, default_value = DEFAULT_CATEGORY)]
        category: String,
        #[arg(long)]
        years: f64,
        /// hourly or salaried
        #[arg(long, default_value = "hourly")]
        pay_type: String,
        #[arg(long)]
        hourly_rate: Option<f64>,
        #[arg(long)]
        annual_salary: Option<f64>,
        #[arg(long)]
        employer: Option<String>,
    },

    /// Statistics for one cohort
    Stats {
        #[arg(long, default_value = DEFAULT_REGION)]
        region: String,
        #[arg(long, default_value = DEFAULT_CATEGORY)]
        category: String,
        #[arg(long)]
        json: bool,
    },

    /// Median growth curve for one cohort
    Series {
        #[arg(long, default_value = DEFAULT_REGION)]
        region: String,
        #[arg(long, default_value = DEFAULT_CATEGORY)]
        category: String,
        #[arg(long)]
        json: bool,
    },

    /// Compare one category across regions
    Compare {
        #[arg(long, default_value = DEFAULT_CATEGORY)]
        category: String,
        #[arg(long, value_delimiter = ',')]
        regions: Vec<String>,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    telemetry::init_tracing();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(db) = cli.db {
        config.database_path = db;
    }

    let store = SqliteStore::open(&config.database_path)?;

    match cli.command {
        Command::Import { csv } => run_import(&store, &csv),
        Command::Submit {
            region,
            category,
            years,
            pay_type,
            hourly_rate,
            annual_salary,
            employer,
        } => {
            let submission = NewSubmission {
                category,
                region,
                years_experience: years,
                pay_type: PayKind::parse(&pay_type),
                hourly_rate,
                annual_salary,
                employer,
            };
            let id = store.submit(submission)?;
            println!("✓ Submitted anonymously ({})", id);
            Ok(())
        }
        Command::Stats {
            region,
            category,
            json,
        } => run_stats(&store, &config, &CohortKey::new(&region, &category), json),
        Command::Series {
            region,
            category,
            json,
        } => run_series(&store, &CohortKey::new(&region, &category), json),
        Command::Compare {
            category,
            regions,
            json,
        } => {
            let regions = if regions.is_empty() {
                default_comparison_regions()
            } else {
                regions
            };
            run_compare(&store, &config, &category, &regions, json)
        }
    }
}

fn run_import(store: &SqliteStore, csv: &Path) -> Result<()> {
    println!("📂 Importing {:?}...", csv);
    let summary = store.import_csv(csv)?;
    println!("✓ Inserted: {} submissions", summary.inserted);
    println!("✓ Skipped duplicates: {}", summary.duplicates);
    println!("✓ Rejected rows: {}", summary.rejected);
    println!("✓ Database contains {} submissions", store.count()?);

    Ok(())
}

fn run_stats(store: &SqliteStore, config: &AppConfig, key: &CohortKey, json: bool) -> Result<()> {
    let stats = block_on(fetch_cohort_statistics(store, key));

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Salary insights for {} ({})", key.region, category_label(&key.category));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for (segment, stat) in stats.iter() {
        println!("{:<12} {}", segment.label(), describe_cell(stat));
    }
    print_unlock_hint(config, key, &stats);

    Ok(())
}

fn run_series(store: &SqliteStore, key: &CohortKey, json: bool) -> Result<()> {
    let series = project_series(&block_on(fetch_cohort_statistics(store, key)));

    if json {
        println!("{}", serde_json::to_string_pretty(&series)?);
        return Ok(());
    }

    if series.is_empty() {
        println!(
            "No experience bucket has {}+ submissions yet for {}",
            DISCLOSURE_THRESHOLD, key
        );
        return Ok(());
    }

    println!("Median annualized pay by experience bucket ({})", key);
    for point in &series {
        println!(
            "{:<12} {:>12}  (n={})",
            point.segment.label(),
            format_money(point.median),
            point.sample_count
        );
    }

    Ok(())
}

fn run_compare(
    store: &SqliteStore,
    config: &AppConfig,
    category: &str,
    regions: &[String],
    json: bool,
) -> Result<()> {
    let matrix = block_on(compare_regions(store, category, regions));

    if json {
        println!("{}", serde_json::to_string_pretty(&matrix)?);
        return Ok(());
    }

    println!(
        "Compare {}: each cell unlocks at {}+ submissions",
        category_label(category),
        DISCLOSURE_THRESHOLD
    );
    for row in &matrix.rows {
        println!("\n{}", row.key.region);
        for (segment, stat) in row.statistics.iter() {
            println!("  {:<12} {}", segment.label(), describe_cell(stat));
        }
        print_unlock_hint(config, &row.key, &row.statistics);
    }

    Ok(())
}

fn describe_cell(stat: &SegmentStatistic) -> String {
    match stat {
        SegmentStatistic::Locked {
            sample_count,
            threshold,
        } => format!(
            "🔒 Locked • {}/{} ({:.0}%)",
            sample_count,
            threshold,
            unlock_progress(*sample_count, *threshold)
        ),
        SegmentStatistic::Unlocked {
            sample_count,
            p25,
            median,
            p75,
        } => format!(
            "Median {}  ({} – {})  n={}",
            format_money(*median),
            format_money(*p25),
            format_money(*p75),
            sample_count
        ),
    }
}

fn print_unlock_hint(config: &AppConfig, key: &CohortKey, stats: &CohortStatistics) {
    if stats.unlocked_count() < ExperienceSegment::ALL.len() {
        println!("  Submit to unlock: {}", submit_link(&config.public_url, key));
    }
}
