use akassa::config::RulesConfig;
use akassa::error::AppError;
use akassa::workflows::benefit::{
    BenefitCalculator, BenefitError, BenefitInput, BenefitReport, BenefitResult, ReplacementRate,
    Scenario, WorkStatus,
};
use akassa::workflows::eligibility::{
    fit_to_window, import_history_csv, rolling_window, EligibilityEvaluator, EligibilityReport,
    MonthlyIncomeRecord, Requirement, RequirementChecklist, YearMonth,
};
use chrono::Local;
use clap::{Args, ValueEnum};
use std::fs::File;
use std::path::PathBuf;

/// Upper bound for `calculate --months`.
pub(crate) const MAX_TOTAL_MONTHS: i64 = 120;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum StatusArg {
    #[default]
    Unemployed,
    PartTime,
}

impl From<StatusArg> for WorkStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Unemployed => WorkStatus::Unemployed,
            StatusArg::PartTime => WorkStatus::PartTime,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct CalculateArgs {
    /// Average monthly income before unemployment (kr)
    #[arg(long)]
    pub(crate) previous_income: f64,
    /// Replacement rate in percent, set by membership tenure
    #[arg(long, default_value_t = 80)]
    pub(crate) rate: u32,
    /// Income earned during the benefit month (kr)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) current_income: f64,
    /// Working days the claimant was unavailable for work
    #[arg(long, default_value_t = 0)]
    pub(crate) unavailable_days: u32,
    #[arg(long, value_enum, default_value_t = StatusArg::Unemployed)]
    pub(crate) status: StatusArg,
    /// Also compare the preset what-if scenarios
    #[arg(long)]
    pub(crate) scenarios: bool,
    /// Number of consecutive months to total (1-120)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_TOTAL_MONTHS))]
    pub(crate) months: Option<u32>,
    /// Print the result as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct EligibilityArgs {
    /// CSV income history with `month,income,notes` columns
    #[arg(long)]
    pub(crate) history: Option<PathBuf>,
    /// Comma-separated requirement keys to mark as met, or `all`
    #[arg(long, value_parser = crate::infra::parse_checklist, default_value = "")]
    pub(crate) checklist: RequirementChecklist,
    /// Last month of the 24-month window (YYYY-MM). Defaults to the current month.
    #[arg(long, value_parser = crate::infra::parse_month)]
    pub(crate) end: Option<YearMonth>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Prior monthly income used for the benefit walkthrough (kr)
    #[arg(long, default_value_t = 30_000.0)]
    pub(crate) previous_income: f64,
    /// Skip the eligibility portion of the demo
    #[arg(long)]
    pub(crate) skip_eligibility: bool,
}

pub(crate) fn run_calculate(args: CalculateArgs, rules: &RulesConfig) -> Result<(), AppError> {
    let calculator = BenefitCalculator::new(rules.benefit.clone());
    let input = BenefitInput::unemployed(args.previous_income, args.rate)
        .with_current_income(args.current_income)
        .with_unavailable_days(args.unavailable_days);

    let result = calculator.compute(&input)?;
    let report = BenefitReport::new(args.status.into(), result);

    if args.json {
        println!("{}", to_json(&report)?);
        return Ok(());
    }

    render_benefit(&report);

    if let Some(months) = args.months {
        let periods = vec![input.clone(); months as usize];
        let total = calculator.total_for_periods(&periods)?;
        println!("\nTotal over {months} months: {}", format_kr(total));
    }

    if args.scenarios {
        render_scenarios(&calculator, &input)?;
    }

    Ok(())
}

pub(crate) fn run_eligibility(args: EligibilityArgs, rules: &RulesConfig) -> Result<(), AppError> {
    let end = args.end.unwrap_or_else(|| YearMonth::from_date(Local::now().date_naive()));
    let history = match args.history {
        Some(path) => {
            let imported = import_history_csv(File::open(&path)?)?;
            fit_to_window(&imported, end)
        }
        None => rolling_window(end),
    };

    let evaluator = EligibilityEvaluator::new(rules.eligibility.clone());
    let report = evaluator.evaluate(&history, &args.checklist);

    if args.json {
        println!("{}", to_json(&report)?);
    } else {
        render_eligibility(&report, &history);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs, rules: &RulesConfig) -> Result<(), AppError> {
    let calculator = BenefitCalculator::new(rules.benefit.clone());

    println!("Unemployment benefit demo");
    println!(
        "Ceiling {} per month | {} working days per month",
        format_kr(rules.benefit.max_monthly_amount),
        rules.benefit.working_days_per_month
    );

    for percent in ReplacementRate::STANDARD {
        let input = BenefitInput::unemployed(args.previous_income, percent);
        let result = calculator.compute(&input)?;
        println!(
            "- {}% of {}: {} per month",
            percent,
            format_kr(args.previous_income),
            format_kr(result.final_amount)
        );
    }

    let base = BenefitInput::unemployed(args.previous_income, 80);
    render_scenarios(&calculator, &base)?;

    let quarter = calculator.total_for_periods(&[base.clone(), base.clone(), base])?;
    println!("\nThree months fully unemployed: {}", format_kr(quarter));

    if args.skip_eligibility {
        return Ok(());
    }

    println!("\nEligibility walkthrough (synthetic history)");
    let end = YearMonth::from_date(Local::now().date_naive());
    let mut history = rolling_window(end);
    for (index, record) in history.iter_mut().rev().take(9).enumerate() {
        record.income = if index % 3 == 2 { 8_500.0 } else { 24_000.0 };
    }

    let checklist: RequirementChecklist = Requirement::ALL
        .into_iter()
        .filter(|requirement| !requirement.is_auto_derived())
        .map(|requirement| (requirement, requirement != Requirement::ActionPlanAgreed))
        .collect();

    let evaluator = EligibilityEvaluator::new(rules.eligibility.clone());
    let report = evaluator.evaluate(&history, &checklist);
    render_eligibility(&report, &history);

    Ok(())
}

fn render_benefit(report: &BenefitReport) {
    let result = &report.result;
    println!("Work status: {}", report.status_label);
    println!(
        "Base amount ({}%): {}",
        result.replacement_rate_percent,
        format_kr(result.base_amount)
    );
    println!("Income reduction: -{}", format_kr(result.income_reduction));
    println!(
        "Availability reduction: -{}",
        format_kr(result.availability_reduction)
    );
    println!("Monthly benefit: {}", format_kr(result.final_amount));
}

fn render_scenarios(calculator: &BenefitCalculator, base: &BenefitInput) -> Result<(), AppError> {
    let break_even = calculator
        .break_even_income(base.previous_monthly_income, base.replacement_rate_percent)
        .map_err(BenefitError::from)?;
    let outcomes = calculator.compare_scenarios(base, &Scenario::presets())?;

    println!("\nScenarios");
    for outcome in &outcomes {
        println!(
            "  - {:<28} {:>10} {}",
            outcome.label,
            format_kr(outcome.result.final_amount),
            reduction_note(&outcome.result)
        );
    }
    println!("Benefit reaches zero at {} of monthly income", format_kr(break_even));
    Ok(())
}

fn reduction_note(result: &BenefitResult) -> String {
    let total = result.income_reduction + result.availability_reduction;
    if total > 0.0 {
        format!("(-{})", format_kr(total))
    } else {
        String::new()
    }
}

fn render_eligibility(report: &EligibilityReport, history: &[MonthlyIncomeRecord]) {
    let decision = &report.decision;
    println!(
        "Status: {} ({}/{} requirements)",
        decision.status.label(),
        decision.met_requirements,
        decision.total_requirements
    );
    println!("{}", decision.rationale);
    println!(
        "Duration: {} ({} qualifying months)",
        report.duration_tier.label(),
        report.summary.qualifying_months
    );
    if let (Some(first), Some(last)) = (history.first(), history.last()) {
        println!(
            "Window {} to {}: {} total, {} average",
            first.month,
            last.month,
            format_kr(report.summary.total_income),
            format_kr(report.summary.average_income)
        );
    }

    let open: Vec<_> = Requirement::ALL
        .into_iter()
        .filter(|requirement| !report.checklist.is_checked(*requirement))
        .collect();
    if !open.is_empty() {
        println!("Outstanding requirements:");
        for requirement in open {
            println!("  - {}", requirement.label());
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|err| AppError::Io(err.into()))
}

/// Whole kronor with space-grouped thousands, e.g. `24 000 kr`.
pub(crate) fn format_kr(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    let sign = if rounded < 0 { "-" } else { "" };
    format!("{sign}{grouped} kr")
}
