//! Envelope validation and status-to-verdict translation.

use std::{fmt, str::FromStr};

use serde_json::Value;

use crate::{errors::Error, Result};

const HOMEWORKS_KEY: &str = "homeworks";
const CURRENT_DATE_KEY: &str = "current_date";

/// Review status reported by the API. Closed set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub fn verdict(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            _ => Err(()),
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate the envelope and return its homework list (possibly empty).
pub fn check_response(response: &Value) -> Result<&[Value]> {
    let Some(obj) = response.as_object() else {
        return Err(Error::UnexpectedType(format!(
            "ответ API должен быть объектом, получено {}",
            json_type(response)
        )));
    };

    let Some(homeworks) = obj.get(HOMEWORKS_KEY) else {
        return Err(Error::MissingKey(HOMEWORKS_KEY));
    };

    let Some(list) = homeworks.as_array() else {
        return Err(Error::UnexpectedType(format!(
            "по ключу {HOMEWORKS_KEY} ожидался список, получено {}",
            json_type(homeworks)
        )));
    };

    if let Some(date) = obj.get(CURRENT_DATE_KEY) {
        if !date.is_i64() && !date.is_u64() {
            return Err(Error::UnexpectedType(format!(
                "по ключу {CURRENT_DATE_KEY} ожидалось целое число, получено {}",
                json_type(date)
            )));
        }
    }

    Ok(list)
}

/// Server timestamp of the envelope, if it carries a usable one.
pub fn current_date(response: &Value) -> Option<i64> {
    response.get(CURRENT_DATE_KEY).and_then(Value::as_i64)
}

/// Translate one homework record into the notification text.
pub fn parse_status(homework: &Value) -> Result<String> {
    let raw_status = match homework.get("status") {
        None | Some(Value::Null) => {
            return Err(undocumented("Ошибка пустое значение status".to_string()))
        }
        Some(raw) => raw,
    };
    let name = match homework.get("homework_name") {
        Some(Value::String(name)) if !name.trim().is_empty() => name,
        None | Some(Value::Null) => {
            return Err(undocumented("Ошибка пустое значение homework_name".to_string()))
        }
        Some(other) => {
            return Err(undocumented(format!(
                "Ошибка пустое значение homework_name: {other}"
            )))
        }
    };

    let status = raw_status
        .as_str()
        .and_then(|s| s.parse::<HomeworkStatus>().ok())
        .ok_or_else(|| {
            undocumented(format!("Ошибка невозможное значение status: {raw_status}"))
        })?;
    tracing::debug!(%status, homework = %name, "homework status parsed");

    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {}",
        status.verdict()
    ))
}

fn undocumented(text: String) -> Error {
    tracing::error!("{text}");
    Error::UndocumentedStatus(text)
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
