use std::{borrow::Cow, error::Error, path::PathBuf};

use clap::{Parser, ValueEnum};
use rusqlite::Connection;
use serde::Serialize;
use time::{Date, Month};

use grocery_ledger::{
    AppState,
    aggregation::{
        MonthlySpend, TotalSpent, month_range, monthly_spending, total_spent,
        total_spent_by_category, total_spent_by_producer, total_spent_by_product,
        total_spent_by_shop,
    },
    basket::BasketOverview,
    currency::{Locale, format_minor_units},
    local_today,
    pagination::{LoadParams, Page, PaginationConfig, PagingSource},
    preferences::{get_hide_decimals, get_locale},
    ranking::{Rankable, rank_by_query},
    setup_logging,
};

/// Print grocery spending reports from a grocery ledger database.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The report to print.
    #[arg(value_enum, default_value_t = Report::Categories)]
    report: Report,

    /// Rank the rows by how well they match this search text.
    #[arg(long, short)]
    query: Option<String>,

    /// Only include baskets from this month, e.g. "2025-03".
    #[arg(long, value_parser = parse_month)]
    month: Option<Date>,

    /// Only include baskets from the current month.
    #[arg(long, conflicts_with = "month")]
    this_month: bool,

    /// The canonical timezone used to decide the current month, e.g. "Pacific/Auckland".
    #[arg(long)]
    timezone: Option<String>,

    /// Format amounts for this locale instead of the saved preference, e.g. "de-DE".
    #[arg(long)]
    locale: Option<String>,

    /// The offset of the first basket to show in the basket list.
    #[arg(long)]
    page: Option<i64>,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Also write debug logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Report {
    Shops,
    Categories,
    Producers,
    Products,
    Months,
    Baskets,
}

/// How amounts are printed.
struct Output {
    locale: Locale,
    hide_decimals: bool,
    json: bool,
}

impl Output {
    fn amount(&self, amount: i64) -> String {
        format_minor_units(amount, &self.locale, self.hide_decimals)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    setup_logging(args.log_file.as_deref())?;

    let conn = Connection::open(&args.db_path)?;
    let state = AppState::new(conn, PaginationConfig::default())?;

    let (saved_locale, hide_decimals) =
        state.read(|conn| Ok((get_locale(conn)?, get_hide_decimals(conn)?)))?;
    let output = Output {
        locale: match &args.locale {
            Some(tag) => Locale::resolve(Some(tag.as_str())),
            None => saved_locale,
        },
        hide_decimals,
        json: args.json,
    };

    let range = if args.this_month {
        Some(month_range(local_today(args.timezone.as_deref())))
    } else {
        args.month.map(month_range)
    };

    if let Some(range) = &range {
        tracing::info!("reporting from {} to {}", range.start(), range.end());
    }

    let query = args.query.as_deref();

    match args.report {
        Report::Shops => {
            let totals = state.read(|conn| total_spent_by_shop(range.as_ref(), conn))?;
            print_ranking(&totals, query, &output)?;
        }
        Report::Categories => {
            let totals = state.read(|conn| total_spent_by_category(range.as_ref(), conn))?;
            print_ranking(&totals, query, &output)?;
        }
        Report::Producers => {
            let totals = state.read(|conn| total_spent_by_producer(range.as_ref(), conn))?;
            print_ranking(&totals, query, &output)?;
        }
        Report::Products => {
            let totals = state.read(|conn| total_spent_by_product(range.as_ref(), conn))?;
            print_ranking(&totals, query, &output)?;
        }
        Report::Months => {
            let months = state.read(|conn| monthly_spending(range.as_ref(), conn))?;
            print_months(&months, &output)?;
        }
        Report::Baskets => {
            let page = state
                .basket_paging_source()
                .load(LoadParams {
                    key: args.page,
                    load_size: state.pagination_config.page_size,
                })
                .await?;
            print_baskets(&page, &output)?;
        }
    }

    if !output.json {
        let total = state.read(|conn| total_spent(range.as_ref(), conn))?;
        println!("\nTotal: {}", output.amount(total));
    }

    Ok(())
}

fn print_ranking<E>(
    totals: &[TotalSpent<E>],
    query: Option<&str>,
    output: &Output,
) -> Result<(), serde_json::Error>
where
    E: Rankable + Clone + Serialize,
{
    let ranked = match query {
        Some(query) => rank_by_query(totals, query),
        None => Cow::Borrowed(totals),
    };

    if output.json {
        return print_json(&ranked);
    }

    if ranked.is_empty() {
        println!("No spending found.");
    }

    for total in ranked.iter() {
        println!(
            "{:<32} {:>14}",
            total.display_name(),
            output.amount(total.total)
        );
    }

    Ok(())
}

fn print_months(months: &[MonthlySpend], output: &Output) -> Result<(), serde_json::Error> {
    if output.json {
        return print_json(months);
    }

    if months.is_empty() {
        println!("No spending found.");
    }

    for month in months {
        println!(
            "{:<16} {:>14}",
            format!("{} {}", month.month.month(), month.month.year()),
            output.amount(month.total)
        );
    }

    Ok(())
}

fn print_baskets(page: &Page<BasketOverview>, output: &Output) -> Result<(), serde_json::Error> {
    if output.json {
        return print_json(&page.items);
    }

    for basket in &page.items {
        println!(
            "{}  {:<20} {:>3} item(s) {:>14}  {}",
            basket.date,
            basket.shop_name.as_deref().unwrap_or("-"),
            basket.item_count,
            output.amount(basket.total),
            basket.note
        );
    }

    match (page.items.is_empty(), page.next_key) {
        (true, _) => println!("No more baskets."),
        (false, Some(next_key)) => println!("\nNext page: --page {next_key}"),
        (false, None) => {}
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

/// Parse a month like "2025-03" into its first day.
fn parse_month(text: &str) -> Result<Date, String> {
    let invalid = || format!("expected a month like \"2025-03\", got {text:?}");

    let (year, month) = text.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u8 = month.parse().map_err(|_| invalid())?;
    let month = Month::try_from(month).map_err(|_| invalid())?;

    Date::from_calendar_date(year, month, 1).map_err(|_| invalid())
}
