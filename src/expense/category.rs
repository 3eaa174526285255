use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

use crate::Error;

/// The kind of spending or income an expense record belongs to.
///
/// Categories travel over the wire as their upper-case names, e.g. `"FOOD"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Meals, groceries and snacks. New records default to this category.
    #[default]
    #[serde(alias = "식비")]
    Food,
    /// Buses, trains, taxis and fuel.
    #[serde(alias = "교통비")]
    Transportation,
    /// Leisure such as films, concerts and books.
    #[serde(alias = "문화생활")]
    Culture,
    /// Clothes, electronics and other purchases.
    #[serde(alias = "쇼핑")]
    Shopping,
    /// Anything that does not fit another category.
    #[serde(alias = "기타")]
    Etc,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Transportation,
        Category::Culture,
        Category::Shopping,
        Category::Etc,
    ];

    /// The wire and database name, e.g. "FOOD".
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "FOOD",
            Category::Transportation => "TRANSPORTATION",
            Category::Culture => "CULTURE",
            Category::Shopping => "SHOPPING",
            Category::Etc => "ETC",
        }
    }

    /// The human readable label, e.g. "Food".
    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transportation => "Transportation",
            Category::Culture => "Culture",
            Category::Shopping => "Shopping",
            Category::Etc => "Other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == text)
            .ok_or_else(|| Error::InvalidRequest(format!("unknown category \"{text}\"")))
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|_| FromSqlError::InvalidType)
    }
}
