use crate::{
    BurndownArgs, Commands, DistributeArgs, MetricsArgs, PeriodsArgs, PoolArgs, RecordArgs,
    SaveSharesArgs, ShowSharesArgs, VelocityArgs, render,
};
use analytics::{CustomerInputs, FinanceEngine, metrics};
use anyhow::Context;
use chrono::Utc;
use configuration::Config;
use core_types::{FinancialRecord, RecordType, TeamMemberShare};
use distribution::{PercentageDistribution, SalaryPoolDistribution};
use std::fs;
use std::path::Path;
use store::{
    JsonFileShareRepository, JsonRecordSource, JsonTaskSource, JsonTeamSource,
    ProfitShareService, RecordSource, ShareRepository, TaskSource, TeamSource,
};

/// Dispatches a parsed command.
pub(crate) fn run(command: Commands, config: &Config) -> anyhow::Result<()> {
    match command {
        Commands::Periods(args) => handle_periods(args, config),
        Commands::Projects(args) => handle_projects(args, config),
        Commands::Metrics(args) => handle_metrics(args, config),
        Commands::Velocity(args) => handle_velocity(args, config),
        Commands::Burndown(args) => handle_burndown(args, config),
        Commands::Distribute(args) => handle_distribute(args, config),
        Commands::Pool(args) => handle_pool(args, config),
        Commands::SaveShares(args) => handle_save_shares(args, config),
        Commands::ShowShares(args) => handle_show_shares(args, config),
    }
}

fn load_records(args: &RecordArgs, config: &Config) -> anyhow::Result<Vec<FinancialRecord>> {
    let path = args.records.as_ref().unwrap_or(&config.storage.records_path);
    let records = JsonRecordSource::new(path).records(args.project.as_deref())?;
    tracing::info!(count = records.len(), project = ?args.project, "Loaded financial records.");
    Ok(records)
}

fn load_shares(path: &Path) -> anyhow::Result<Vec<TeamMemberShare>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read shares from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid shares JSON in {}", path.display()))
}

fn percentage_rules(config: &Config) -> anyhow::Result<PercentageDistribution> {
    Ok(PercentageDistribution::new(config.distribution.share_tolerance)?)
}

fn open_share_store(path: Option<&Path>, config: &Config) -> anyhow::Result<JsonFileShareRepository> {
    let path = path.unwrap_or(config.storage.shares_path.as_path());
    Ok(JsonFileShareRepository::open(path)?)
}

fn handle_periods(args: PeriodsArgs, config: &Config) -> anyhow::Result<()> {
    let period_type = args.period.unwrap_or(config.reporting.default_period);
    let records = load_records(&args.source, config)?;
    let periods = analytics::aggregate_by_period(&records, period_type)?;

    if periods.is_empty() {
        println!("No dated records to aggregate.");
        return Ok(());
    }
    println!("{}", render::periods(&periods));
    Ok(())
}

fn handle_projects(args: RecordArgs, config: &Config) -> anyhow::Result<()> {
    let records = load_records(&args, config)?;
    let projects = analytics::aggregate_by_project(&records)?;

    if projects.is_empty() {
        println!("No records found.");
        return Ok(());
    }
    println!("{}", render::projects(&projects));
    Ok(())
}

fn handle_metrics(args: MetricsArgs, config: &Config) -> anyhow::Result<()> {
    let records = load_records(&args.source, config)?;
    let inputs = CustomerInputs {
        cash_on_hand: args.cash_on_hand,
        acquisition_spend: args.acquisition_spend,
        new_customers: args.new_customers,
        lost_customers: args.lost_customers,
        total_customers: args.total_customers,
        avg_revenue_per_customer: args.avg_revenue_per_customer,
    };

    let report = FinanceEngine::new().calculate(&records, &inputs)?;
    println!("{}", render::report(&report));

    let expenses = analytics::category_breakdown(&records, RecordType::Expense)?;
    if !expenses.is_empty() {
        println!("{}", render::breakdown("Expense category", &expenses));
    }
    Ok(())
}

fn handle_velocity(args: VelocityArgs, config: &Config) -> anyhow::Result<()> {
    let path = args.tasks.as_ref().unwrap_or(&config.storage.tasks_path);
    let all_tasks = JsonTaskSource::new(path).tasks(None)?;
    let tasks: Vec<_> = all_tasks
        .into_iter()
        .filter(|t| args.sprints.iter().any(|s| t.in_sprint(s)))
        .collect();

    let rows: Vec<(String, u64)> = args
        .sprints
        .iter()
        .map(|sprint| (sprint.clone(), metrics::sprint_velocity(&tasks, sprint)))
        .collect();
    let sprint_ids: Vec<&str> = args.sprints.iter().map(String::as_str).collect();

    let table = render::velocity(
        &rows,
        metrics::average_velocity(&tasks, &sprint_ids),
        metrics::cycle_time_days(&tasks, Utc::now()),
        metrics::completion_rate(&tasks),
    );
    println!("{table}");
    Ok(())
}

fn handle_burndown(args: BurndownArgs, config: &Config) -> anyhow::Result<()> {
    let path = args.tasks.as_ref().unwrap_or(&config.storage.tasks_path);
    let tasks = JsonTaskSource::new(path).tasks(Some(args.sprint.as_str()))?;
    let today = args.today.unwrap_or_else(|| Utc::now().date_naive());

    let chart = analytics::sprint_burndown(&args.sprint, args.from, args.to, &tasks, today)?;
    println!(
        "Sprint {}: {} of {} points remaining",
        chart.sprint_id, chart.remaining_points, chart.total_points
    );
    println!("{}", render::burndown(&chart));
    Ok(())
}

fn handle_distribute(args: DistributeArgs, config: &Config) -> anyhow::Result<()> {
    let rules = percentage_rules(config)?;
    let shares = load_shares(&args.shares)?;
    let distributed = rules.distribute(args.revenue, &shares)?;
    println!("{}", render::shares(&distributed));

    // Previews are allowed to be incomplete; only saving enforces the total.
    if let Err(e) = rules.check_total("preview", &distributed) {
        println!("Warning: {e}. This split cannot be saved as is.");
    }
    Ok(())
}

fn handle_pool(args: PoolArgs, config: &Config) -> anyhow::Result<()> {
    let ratio = args.salary_ratio.unwrap_or(config.distribution.salary_ratio);
    let policy = SalaryPoolDistribution::new(ratio)?;
    let path = args.team.as_ref().unwrap_or(&config.storage.team_path);
    let members = JsonTeamSource::new(path).members()?;

    let allocations = policy.allocate(args.pool, &members)?;
    if allocations.is_empty() {
        println!("No team members to allocate to.");
        return Ok(());
    }
    println!("{}", render::pool(&allocations, policy.salary_ratio()));
    Ok(())
}

fn handle_save_shares(args: SaveSharesArgs, config: &Config) -> anyhow::Result<()> {
    let shares = load_shares(&args.shares)?;
    let repository = open_share_store(args.store.as_deref(), config)?;
    let service = ProfitShareService::new(repository, percentage_rules(config)?);

    let saved = service
        .update_profit_shares(&args.project, shares, args.revenue)
        .with_context(|| format!("Profit shares for project '{}' were not saved", args.project))?;

    println!("{}", render::shares(&saved));
    println!(
        "Saved {} shares for project '{}' to {}",
        saved.len(),
        args.project,
        service.repository().path().display()
    );
    Ok(())
}

fn handle_show_shares(args: ShowSharesArgs, config: &Config) -> anyhow::Result<()> {
    let repository = open_share_store(args.store.as_deref(), config)?;
    let shares = repository.project_shares(&args.project)?;

    if shares.is_empty() {
        println!("No profit shares saved for project '{}'.", args.project);
        return Ok(());
    }
    println!("{}", render::shares(&shares));
    Ok(())
}
