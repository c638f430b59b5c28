use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Expense {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub amount: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(
        rename = "categoryId",
        default,
        deserialize_with = "category_reference"
    )]
    pub category_id: Option<String>,
}

/// Body of `POST /expenses`. Title and amount are the raw form values.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewExpense {
    pub title: String,
    pub amount: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "categoryId")]
    pub category_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewCategory {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

// One malformed row must not sink the whole list: null or missing becomes
// "", and numbers (amounts are posted as text but stored as numbers) are
// kept as their decimal text.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected text or number, got {other}"
        ))),
    }
}

// Accepts either a bare id or a populated `{ _id, name }` document.
fn category_reference<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Object(map)) => map
            .get("_id")
            .or_else(|| map.get("id"))
            .and_then(|v| v.as_str())
            .map(str::to_string),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case(r#"{"title":"Tea","amount":40,"date":"2024-01-02T10:00:00.000Z","categoryId":"c1"}"#, "40")]
    #[case(r#"{"title":"Tea","amount":"12.50","date":"2024-01-02T10:00:00.000Z","categoryId":"c1"}"#, "12.50")]
    #[case(r#"{"title":"Tea","amount":null,"date":"2024-01-02T10:00:00.000Z"}"#, "")]
    fn expense_amount_is_kept_as_text(#[case] raw: &str, #[case] expected: &str) {
        let expense: Expense = serde_json::from_str(raw).unwrap();
        assert_eq!(expense.amount, expected);
    }

    #[test]
    fn row_with_missing_date_or_null_title_still_decodes() {
        let raw = r#"[
            {"title":"Tea","amount":40,"date":"2024-01-02T10:00:00.000Z","categoryId":"c1"},
            {"title":"Bus","amount":3,"categoryId":"c1"},
            {"title":null,"amount":7,"date":"2024-01-03T10:00:00.000Z","categoryId":"c1"}
        ]"#;
        let list: Vec<Expense> = serde_json::from_str(raw).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[1].title, "Bus");
        assert_eq!(list[1].date, "");
        assert_eq!(list[2].title, "");
        assert_eq!(list[2].amount, "7");
    }

    #[test]
    fn token_body_ignores_extra_fields() {
        let body: TokenResponse =
            serde_json::from_str(r#"{"token":"abc","user":{"email":"ana@example.com"}}"#).unwrap();
        assert_eq!(body.token, "abc");
    }

    #[test]
    fn populated_category_reference_resolves_to_its_id() {
        let raw = r#"{"_id":"e1","title":"Bus","amount":3,"date":"2024-01-02","categoryId":{"_id":"c9","name":"Travel"}}"#;
        let expense: Expense = serde_json::from_str(raw).unwrap();
        assert_eq!(expense.id.as_deref(), Some("e1"));
        assert_eq!(expense.category_id.as_deref(), Some("c9"));
    }

    #[test]
    fn category_reads_mongo_style_id() {
        let cats: Vec<Category> =
            serde_json::from_str(r#"[{"_id":"a","name":"Food"},{"id":"b","name":"Rent"}]"#).unwrap();
        assert_eq!(cats[0].id, "a");
        assert_eq!(cats[1].id, "b");
    }

    #[test]
    fn new_expense_uses_backend_field_names() {
        let body = NewExpense {
            title: String::new(),
            amount: String::new(),
            date: Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap(),
            category_id: "c1".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["categoryId"], "c1");
        assert_eq!(json["title"], "");
        assert_eq!(json["date"], "2024-03-01T08:30:00Z");
    }
}
