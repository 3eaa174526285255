use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker::{
    ExpenseId,
    client::{ClientError, Controller, HttpExpensesApi, Step, ViewState},
    expense::{Category, ExpenseForm},
    local_today,
    month::{MonthQuery, MonthScope},
};

/// Read and record expenses on a running expense tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The address of the server.
    #[arg(long, env = "EXPENSES_URL", default_value = "http://127.0.0.1:3000")]
    url: String,

    /// The canonical name of the local timezone, used to pick the current month.
    #[arg(long, env = "EXPENSES_TIMEZONE", default_value = "Etc/UTC")]
    timezone: String,

    /// The year of the month to work on. Defaults to the current month.
    #[arg(long, requires = "month")]
    year: Option<String>,

    /// The month of the year to work on, 1-12.
    #[arg(long, requires = "year")]
    month: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the totals and records for the month.
    Show {
        /// Show the month before the selected one.
        #[arg(long, conflicts_with = "next")]
        previous: bool,

        /// Show the month after the selected one.
        #[arg(long)]
        next: bool,
    },
    /// Record an expense, or income if the amount starts with '+'.
    Add {
        /// The date as YYYY-MM-DD.
        #[arg(long)]
        date: String,

        #[arg(long)]
        title: String,

        /// The amount, e.g. 12000 or +700000.
        #[arg(long, allow_hyphen_values = true)]
        amount: String,

        /// One of FOOD, TRANSPORTATION, CULTURE, SHOPPING or ETC.
        #[arg(long, default_value = "FOOD")]
        category: String,
    },
    /// Delete the record with the given ID.
    Delete { id: ExpenseId },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();

    let scope = match selected_month(&args) {
        Ok(scope) => scope,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    let mut controller = Controller::new(HttpExpensesApi::new(&args.url), scope);

    let result = match args.command {
        Command::Show { previous, next } => {
            if previous {
                controller.navigate(Step::Previous).await;
            } else if next {
                controller.navigate(Step::Next).await;
            } else {
                controller.refresh().await;
            }
            Ok(())
        }
        Command::Add {
            date,
            title,
            amount,
            category,
        } => add(&mut controller, date, title, amount, &category).await,
        Command::Delete { id } => controller.delete(id).await.map(|expense| {
            println!("Deleted {} \"{}\"", expense.id, expense.title);
        }),
    };

    if let Err(error) = result {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    print_month(controller.state())
}

fn selected_month(args: &Args) -> Result<MonthScope, expense_tracker::Error> {
    let query = MonthQuery {
        year: args.year.clone(),
        month: args.month.clone(),
    };

    if query.is_empty() {
        local_today(&args.timezone).map(MonthScope::containing)
    } else {
        query.scope()
    }
}

async fn add(
    controller: &mut Controller<HttpExpensesApi>,
    date: String,
    title: String,
    amount: String,
    category: &str,
) -> Result<(), ClientError> {
    let category: Category = category.parse()?;
    let builder = ExpenseForm {
        date,
        title,
        amount,
        category,
    }
    .into_builder()?;

    let expense = controller.create(builder).await?;
    println!("Added {} \"{}\"", expense.id, expense.title);

    Ok(())
}

fn print_month(state: &ViewState) -> ExitCode {
    let Some(data) = state.data().filter(|data| data.scope == state.current()) else {
        eprintln!("Could not load expenses for {}", state.current());
        return ExitCode::FAILURE;
    };

    println!("{}", data.scope);
    println!(
        "income {}  expenses {}  net {}",
        data.summary.income_total,
        data.summary.expense_total,
        data.summary.net_total()
    );

    for expense in &data.expenses {
        println!(
            "{:>6}  {}  {:<16} {:<14} {}{}",
            expense.id,
            expense.date,
            expense.title,
            expense.category.label(),
            if expense.income { "+" } else { "-" },
            expense.amount
        );
    }

    ExitCode::SUCCESS
}
