use crate::cli::{Cli, Commands, GlobalArgs};
use anyhow::{Context, Result};
use clap::Parser;
use skillrec_datasource::open_profiles;
use skillrec_intelligence::{
    summarize_recommendations, EmployeeId, RecommendError, RecommenderConfig, SkillRecommendation,
    SkillRecommender,
};
use skillrec_state::{profiles_from_env, render_toml, ConfigLoader};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// The main entry point for the `skillrec` application.
pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    dispatch(cli, &mut out)
}

fn dispatch(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = load_config(&cli.global)?;

    match cli.command {
        Commands::Config => {
            write!(out, "{}", render_toml(&config)?)?;
        }
        Commands::Recommend {
            employee,
            count,
            most_similar,
            ignored,
            json,
        } => {
            let engine = open_engine(&cli.global, config)?;
            handle_recommend_command(&engine, employee, count, most_similar, &ignored, json, out)?;
        }
        Commands::Skills { employee } => {
            let engine = open_engine(&cli.global, config)?;
            handle_skills_command(&engine, employee, out)?;
        }
        Commands::Inspect { json } => {
            let engine = open_engine(&cli.global, config)?;
            handle_inspect_command(&engine, json, out)?;
        }
    }
    Ok(())
}

fn load_config(global: &GlobalArgs) -> Result<RecommenderConfig> {
    let mut loader = ConfigLoader::new().with_overrides(&global.overrides)?;
    if let Some(path) = &global.config {
        loader = loader.with_file(path);
    }
    let loaded = loader.load()?;
    debug!(
        target: "skillrec::cli",
        file = ?loaded.file,
        env_overrides = loaded.env_overrides.len(),
        "Configuration loaded"
    );
    Ok(loaded.config)
}

fn profiles_path(global: &GlobalArgs) -> Result<PathBuf> {
    global
        .profiles
        .clone()
        .or_else(profiles_from_env)
        .context("no skill profiles given; pass --profiles or set SKILLREC_PROFILES")
}

fn open_engine(global: &GlobalArgs, config: RecommenderConfig) -> Result<SkillRecommender> {
    let path = profiles_path(global)?;
    let source = open_profiles(&path, global.format.into())
        .with_context(|| format!("failed to open skill profiles {}", path.display()))?;
    let engine = SkillRecommender::new(source, config)
        .with_context(|| format!("failed to build recommender from {}", path.display()))?;
    Ok(engine)
}

fn handle_recommend_command(
    engine: &SkillRecommender,
    employee: EmployeeId,
    count: usize,
    most_similar: usize,
    ignored: &[String],
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let rec = match engine.recommend_ignoring(employee, count, most_similar, ignored) {
        Ok(rec) => rec,
        Err(err @ RecommendError::NoDataForEmployee { .. }) => {
            debug!(target: "skillrec::cli", employee, reason = %err, "Nothing to recommend");
            if json {
                let empty = SkillRecommendation::default();
                writeln!(out, "{}", serde_json::to_string_pretty(&empty)?)?;
            } else {
                writeln!(
                    out,
                    "No recommendations for employee {employee}: no skill data found."
                )?;
            }
            return Ok(());
        }
    };

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&rec)?)?;
        return Ok(());
    }

    writeln!(
        out,
        "{}",
        summarize_recommendations(rec.len(), &rec.most_similar_to)
    )?;
    for (rank, (skill, score)) in rec.iter().enumerate() {
        writeln!(out, "  {:>2}. {skill} ({score:.3})", rank + 1)?;
    }
    writeln!(out, "{}", engine.explain(&rec))?;
    Ok(())
}

fn handle_skills_command(
    engine: &SkillRecommender,
    employee: EmployeeId,
    out: &mut impl Write,
) -> Result<()> {
    let skills = engine.known_skills(employee);
    if skills.is_empty() {
        writeln!(out, "No skills found for employee {employee}.")?;
        return Ok(());
    }
    for skill in skills {
        writeln!(out, "{skill}")?;
    }
    Ok(())
}

fn handle_inspect_command(
    engine: &SkillRecommender,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let stats = engine.stats();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
        return Ok(());
    }
    let config = engine.config();
    writeln!(out, "Employees:       {}", stats.employees)?;
    writeln!(out, "Skill features:  {}", stats.features)?;
    writeln!(out, "Dropped as rare: {}", stats.dropped_rare)?;
    writeln!(out, "Density:         {:.4}", stats.density)?;
    writeln!(out, "Metric:          {}", config.similarity_metric)?;
    Ok(())
}
