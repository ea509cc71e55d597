use diesel::deserialize::{FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::serialize;
use diesel::serialize::{IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::{Sqlite, SqliteValue};
use serde::{Deserialize, Serialize};

/// Where a topic's study material came from
///
/// This is a closed enumeration; unknown values in the database are a
/// deserialization error rather than a silent fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Class,
    Book,
    Video,
    Other,
}

impl Source {
    /// Returns the canonical lowercase name used in the database and the API
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Class => "class",
            Source::Book => "book",
            Source::Video => "video",
            Source::Other => "other",
        }
    }
}

impl std::str::FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "class" => Ok(Source::Class),
            "book" => Ok(Source::Book),
            "video" => Ok(Source::Video),
            "other" => Ok(Source::Other),
            other => Err(format!("Unknown source: {}", other)),
        }
    }
}

impl FromSql<Text, Sqlite> for Source {
    fn from_sql(value: SqliteValue<'_, '_, '_>) -> diesel::deserialize::Result<Self> {
        let text = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
        text.parse().map_err(|e: String| e.into())
    }
}

impl ToSql<Text, Sqlite> for Source {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str());
        Ok(IsNull::No)
    }
}
