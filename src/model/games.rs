use crate::error::AppError;
use crate::model::Publisher;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Game {
    #[serde(rename = "GameID")]
    pub game_id: i32,
    #[serde(rename = "GameName")]
    pub game_name: String,
    #[serde(rename = "PublisherID")]
    pub publisher_id: Option<i32>,
    /// ISO date, `YYYY-MM-DD`.
    #[serde(rename = "ReleaseDate")]
    pub release_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewGame {
    #[serde(rename = "GameName")]
    pub game_name: String,
    #[serde(rename = "PublisherID", default)]
    pub publisher_id: Option<i32>,
    #[serde(rename = "ReleaseDate", default)]
    pub release_date: Option<NaiveDate>,
}

/// Aggregate applied to the character length of game names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticOp {
    Min,
    Max,
    Avg,
    Count,
}

impl StatisticOp {
    pub const INVALID_MESSAGE: &'static str = "Invalid operation. Use one of MIN, MAX, AVG, or COUNT.";

    pub fn as_str(&self) -> &'static str {
        match self {
            StatisticOp::Min => "MIN",
            StatisticOp::Max => "MAX",
            StatisticOp::Avg => "AVG",
            StatisticOp::Count => "COUNT",
        }
    }
}

impl fmt::Display for StatisticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatisticOp {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MIN" => Ok(StatisticOp::Min),
            "MAX" => Ok(StatisticOp::Max),
            "AVG" => Ok(StatisticOp::Avg),
            "COUNT" => Ok(StatisticOp::Count),
            _ => Err(AppError::Validation(Self::INVALID_MESSAGE.into())),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatisticsQuery {
    /// One of MIN, MAX, AVG, COUNT (case-insensitive).
    pub operation: Option<String>,
}

/// MIN, MAX and COUNT are whole numbers; only AVG is fractional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum StatisticValue {
    Integer(i64),
    Float(f64),
}

impl StatisticOp {
    /// Shape a raw aggregate the way SQL types it.
    pub fn value(&self, raw: f64) -> StatisticValue {
        match self {
            StatisticOp::Avg => StatisticValue::Float(raw),
            StatisticOp::Min | StatisticOp::Max | StatisticOp::Count => StatisticValue::Integer(raw.round() as i64),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GameNameStatistics {
    pub operation: String,
    /// `null` for MIN/MAX/AVG when there are no games.
    pub result: Option<StatisticValue>,
}

/// One synthetic publisher and its games, inserted together by the seeding helper.
#[derive(Debug, Clone)]
pub struct SeedPublisher {
    pub publisher_name: String,
    pub games: Vec<SeedGame>,
}

#[derive(Debug, Clone)]
pub struct SeedGame {
    pub game_name: String,
    pub release_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SeedReport {
    pub message: String,
    pub publishers: Vec<Publisher>,
    pub games: Vec<Game>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_operations_case_insensitively() {
        assert_eq!("min".parse::<StatisticOp>().unwrap(), StatisticOp::Min);
        assert_eq!(" Avg ".parse::<StatisticOp>().unwrap(), StatisticOp::Avg);
        assert_eq!("COUNT".parse::<StatisticOp>().unwrap(), StatisticOp::Count);
    }

    #[test]
    fn rejects_unknown_operations() {
        for op in ["SUM", "", "median"] {
            let err = op.parse::<StatisticOp>().unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{op}");
        }
    }

    #[test]
    fn only_avg_is_fractional() {
        let count = GameNameStatistics {
            operation: "COUNT".into(),
            result: Some(StatisticOp::Count.value(2.0)),
        };
        assert_eq!(
            serde_json::to_string(&count).unwrap(),
            r#"{"operation":"COUNT","result":2}"#
        );
        assert_eq!(StatisticOp::Max.value(6.0), StatisticValue::Integer(6));
        assert_eq!(StatisticOp::Avg.value(4.5), StatisticValue::Float(4.5));
    }

    #[test]
    fn game_serializes_with_wire_names() {
        let game = Game {
            game_id: 7,
            game_name: "Foo".into(),
            publisher_id: None,
            release_date: NaiveDate::from_ymd_opt(2020, 3, 1),
        };
        let v = serde_json::to_value(&game).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"GameID": 7, "GameName": "Foo", "PublisherID": null, "ReleaseDate": "2020-03-01"})
        );
    }
}
