//! The inline form for recording an expense and the parsing of its raw text.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error, endpoints,
    expense::{Category, ExpenseBuilder, format_calendar_date, parse_calendar_date},
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The amount and direction read from the amount text of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedAmount {
    /// The amount in whole currency units.
    pub amount: u64,
    /// Whether the text was marked as income with a leading `+`.
    pub income: bool,
}

/// Read the raw amount text typed into the form.
///
/// The record is income exactly when the first character of the raw text is
/// `+`; the `+` is then dropped before the number is read. Surrounding
/// whitespace is ignored and empty text reads as zero.
///
/// # Errors
/// Returns [Error::InvalidAmount] if the rest of the text is not a whole,
/// non-negative number that fits in the database.
pub fn parse_amount_text(text: &str) -> Result<ParsedAmount, Error> {
    let income = text.starts_with('+');
    let digits = text.strip_prefix('+').unwrap_or(text).trim();

    if digits.is_empty() {
        return if income {
            Err(Error::InvalidAmount(text.to_owned()))
        } else {
            Ok(ParsedAmount {
                amount: 0,
                income,
            })
        };
    }

    if !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(Error::InvalidAmount(text.to_owned()));
    }

    let amount = digits
        .parse::<i64>()
        .ok()
        .and_then(|amount| u64::try_from(amount).ok())
        .ok_or_else(|| Error::InvalidAmount(text.to_owned()))?;

    Ok(ParsedAmount { amount, income })
}

/// The fields submitted by the inline creation form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseForm {
    /// The date as "YYYY-MM-DD".
    pub date: String,
    /// Free-form text describing the expense.
    pub title: String,
    /// The raw amount text, e.g. "12000" or "+700000".
    pub amount: String,
    /// The selected category, [Category::Food] when the field is missing.
    #[serde(default)]
    pub category: Category,
}

impl ExpenseForm {
    /// Validate the form and turn it into a new expense.
    ///
    /// # Errors
    /// Returns [Error::InvalidRequest] for a malformed date or
    /// [Error::InvalidAmount] for malformed amount text.
    pub fn into_builder(self) -> Result<ExpenseBuilder, Error> {
        let date = parse_calendar_date(&self.date)?;
        let ParsedAmount { amount, income } = parse_amount_text(&self.amount)?;

        Ok(ExpenseBuilder {
            date,
            title: self.title,
            category: self.category,
            amount,
            income,
        })
    }
}

/// The inline form for recording an expense dated `default_date` by default.
pub fn expense_form_view(default_date: Date) -> Markup {
    html! {
        form
            hx-post=(endpoints::EXPENSE_FORM)
            hx-target="#alert-container"
            hx-target-error="#alert-container"
            class="grid grid-cols-1 gap-4 md:grid-cols-5 w-full"
        {
            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                input
                    type="date"
                    name="date"
                    id="date"
                    required
                    value=(format_calendar_date(default_date))
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="title" class=(FORM_LABEL_STYLE) { "Title" }
                input
                    type="text"
                    name="title"
                    id="title"
                    placeholder="Lunch"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                input
                    type="text"
                    name="amount"
                    id="amount"
                    inputmode="numeric"
                    placeholder="12000, or +12000 for income"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for category in Category::ALL {
                        option value=(category.as_str()) selected[category == Category::default()]
                        {
                            (category.label())
                        }
                    }
                }
            }

            div class="flex items-end"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        Error, endpoints,
        expense::{Category, Expense},
        test_utils::{assert_form_input, assert_hx_endpoint, assert_valid_html, must_get_form},
    };

    use super::{ExpenseForm, ParsedAmount, expense_form_view, parse_amount_text};

    #[test]
    fn plain_number_is_spending() {
        assert_eq!(
            parse_amount_text("12000"),
            Ok(ParsedAmount {
                amount: 12_000,
                income: false
            })
        );
    }

    #[test]
    fn leading_plus_is_income() {
        assert_eq!(
            parse_amount_text("+500"),
            Ok(ParsedAmount {
                amount: 500,
                income: true
            })
        );
    }

    #[test]
    fn income_is_decided_by_final_text() {
        // Typing "+" then deleting it leaves plain spending.
        assert_eq!(parse_amount_text("500").map(|parsed| parsed.income), Ok(false));
    }

    #[test]
    fn plus_after_whitespace_is_not_income() {
        assert_eq!(
            parse_amount_text(" 500 "),
            Ok(ParsedAmount {
                amount: 500,
                income: false
            })
        );
    }

    #[test]
    fn empty_text_is_zero() {
        assert_eq!(
            parse_amount_text(""),
            Ok(ParsedAmount {
                amount: 0,
                income: false
            })
        );
    }

    #[test]
    fn rejects_malformed_amounts() {
        for text in ["abc", "-500", "12.5", "1e3", "++5", "+", "99999999999999999999"] {
            assert_eq!(
                parse_amount_text(text),
                Err(Error::InvalidAmount(text.to_owned())),
                "{text:?}"
            );
        }
    }

    #[test]
    fn form_becomes_builder() {
        let form = ExpenseForm {
            date: "2024-05-25".to_owned(),
            title: "Salary".to_owned(),
            amount: "+700000".to_owned(),
            category: Category::Etc,
        };

        assert_eq!(
            form.into_builder(),
            Ok(Expense::build(date!(2024 - 05 - 25), "Salary", 700_000)
                .category(Category::Etc)
                .income(true))
        );
    }

    #[test]
    fn missing_category_defaults_to_food() {
        let form: ExpenseForm = serde_json::from_value(serde_json::json!({
            "date": "2024-05-10",
            "title": "Lunch",
            "amount": "12000"
        }))
        .unwrap();

        assert_eq!(form.category, Category::Food);
    }

    #[test]
    fn form_view_has_fields() {
        let html = Html::parse_fragment(&expense_form_view(date!(2024 - 05 - 10)).into_string());
        assert_valid_html(&html);
        let form = must_get_form(&html);

        assert_hx_endpoint(&form, endpoints::EXPENSE_FORM, "hx-post");
        assert_eq!(assert_form_input(&form, "date", "date"), "2024-05-10");
        assert_form_input(&form, "title", "text");
        assert_form_input(&form, "amount", "text");

        let selected: Vec<_> = form
            .select(&Selector::parse("select[name=category] option[selected]").unwrap())
            .filter_map(|option| option.value().attr("value"))
            .collect();
        assert_eq!(selected, ["FOOD"]);
    }
}
