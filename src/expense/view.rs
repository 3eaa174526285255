//! Renders the monthly expenses page from a [ViewState].

use maud::{Markup, html};
use time::Date;

use crate::{
    client::ViewState,
    endpoints::{self, format_endpoint, with_month_query},
    expense::{EXPENSES_CHANGED_EVENT, Expense, MonthSummary, expense_form_view},
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_amount,
        format_display_date, format_signed_amount,
    },
    month::MonthScope,
};

const INCOME_STYLE: &str = "text-green-600 dark:text-green-400";
const SPENDING_STYLE: &str = "text-red-600 dark:text-red-400";

/// The full expenses page for the selected month of `state`.
pub fn expenses_page_view(state: &ViewState, today: Date) -> Markup {
    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            (month_navigation_view(state))
            (month_panel_view(state, today))
        }
    };

    base("Expenses", &content)
}

fn month_heading(scope: MonthScope) -> String {
    format!("{} {}", scope.first_day().month(), scope.year())
}

fn month_navigation_view(state: &ViewState) -> Markup {
    let previous = state.previous_month();
    let next = state.next_month();

    html! {
        nav
            aria-label="Month navigation"
            class="flex items-center justify-between w-full max-w-4xl mb-6"
        {
            a
                href=(with_month_query(endpoints::ROOT, previous))
                rel="prev"
                class=(LINK_STYLE)
            {
                "← " (month_heading(previous))
            }

            h1 id="current-month" class="text-2xl font-bold"
            {
                (month_heading(state.current()))
            }

            a
                href=(with_month_query(endpoints::ROOT, next))
                rel="next"
                class=(LINK_STYLE)
            {
                (month_heading(next)) " →"
            }
        }
    }
}

/// The refreshable part of the page: totals, creation form and listing.
///
/// The panel reloads itself whenever a response triggers
/// [EXPENSES_CHANGED_EVENT].
pub fn month_panel_view(state: &ViewState, today: Date) -> Markup {
    let scope = state.current();
    let (summary, expenses): (MonthSummary, &[Expense]) = match state.data() {
        Some(data) if data.scope == scope => (data.summary, &data.expenses),
        _ => (MonthSummary::default(), &[]),
    };

    html! {
        div
            id="month-panel"
            hx-get=(with_month_query(endpoints::MONTH_PANEL, scope))
            hx-trigger={ (EXPENSES_CHANGED_EVENT) " from:body" }
            hx-swap="outerHTML"
            class="flex flex-col gap-6 w-full max-w-4xl"
        {
            (totals_view(summary))
            (expense_form_view(today))
            (expense_table_view(expenses))
        }
    }
}

fn totals_view(summary: MonthSummary) -> Markup {
    let net_total = summary.net_total();

    html! {
        dl class="grid grid-cols-3 gap-4 text-center"
        {
            div
            {
                dt class="text-sm" { "Income" }
                dd id="income-total" class=(INCOME_STYLE) { (format_amount(summary.income_total)) }
            }
            div
            {
                dt class="text-sm" { "Expenses" }
                dd id="expense-total" class=(SPENDING_STYLE) { (format_amount(summary.expense_total)) }
            }
            div
            {
                dt class="text-sm" { "Net" }
                dd
                    id="net-total"
                    class=(if net_total < 0 { SPENDING_STYLE } else { INCOME_STYLE })
                {
                    (format_signed_amount(net_total))
                }
            }
        }
    }
}

fn expense_table_view(expenses: &[Expense]) -> Markup {
    html! {
        table class="w-full text-sm text-left"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Title" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                    th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                }
            }

            tbody
            {
                @for expense in expenses {
                    (expense_row_view(expense))
                }

                @if expenses.is_empty() {
                    tr class=(TABLE_ROW_STYLE)
                    {
                        td colspan="5" class=(TABLE_CELL_STYLE) { "Nothing recorded for this month." }
                    }
                }
            }
        }
    }
}

fn expense_row_view(expense: &Expense) -> Markup {
    let (sign, amount_style) = if expense.income {
        ("+", INCOME_STYLE)
    } else {
        ("-", SPENDING_STYLE)
    };

    html! {
        tr id={ "expense-" (expense.id) } class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (format_display_date(expense.date)) }
            td class=(TABLE_CELL_STYLE) { (expense.title) }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (expense.category.label()) }
            }
            td class={ (TABLE_CELL_STYLE) " " (amount_style) } data-income=(expense.income)
            {
                (sign) (format_amount(expense.amount))
            }
            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    hx-delete=(format_endpoint(endpoints::DELETE_EXPENSE, expense.id))
                    hx-target="#alert-container"
                    hx-target-error="#alert-container"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}
