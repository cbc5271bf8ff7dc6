//! Inline-button callback tokens.
//!
//! A token is a `:`-delimited tuple whose first field is the action tag. Tokens are decoded once
//! at the boundary into [`Action`]; nothing downstream looks at raw strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DELIMITER: char = ':';

/// Telegram rejects callback data longer than this many bytes.
pub const MAX_CALLBACK_BYTES: usize = 64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallbackError {
    #[error("empty callback data")]
    Empty,
    #[error("unknown tag: {0}")]
    UnknownTag(String),
    #[error("{tag} expects {expected} parameter(s), got {found}")]
    Arity {
        tag: String,
        expected: usize,
        found: usize,
    },
    #[error("unknown search kind: {0}")]
    UnknownSearchKind(String),
    #[error("{0} has an empty parameter")]
    EmptyField(String),
}

/// Which side of the board a search serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    /// Employer looking for workers; ends in an offer to post a vacancy.
    Employee,
    /// Worker looking for vacancies; ends in a job search.
    Job,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Employee => "employee",
            SearchKind::Job => "job",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchKind {
    type Err = CallbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee" => Ok(SearchKind::Employee),
            "job" => Ok(SearchKind::Job),
            other => Err(CallbackError::UnknownSearchKind(other.to_string())),
        }
    }
}

/// A decoded button press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Menu,
    Back,
    Profile,
    Search(SearchKind),
    Entertainment,
    EarnTogether,
    Subscription,
    FillForm,
    Category { name: String, kind: SearchKind },
    Subcategory { name: String, kind: SearchKind },
    City { name: String, kind: SearchKind },
    AddVacancy,
    FormCity(String),
}

impl Action {
    pub fn tag(&self) -> &'static str {
        match self {
            Action::Menu => "menu",
            Action::Back => "back",
            Action::Profile => "profile",
            Action::Search(SearchKind::Employee) => "search_employee",
            Action::Search(SearchKind::Job) => "search_job",
            Action::Entertainment => "entertainment",
            Action::EarnTogether => "earn_together",
            Action::Subscription => "subscription",
            Action::FillForm => "fill_form",
            Action::Category { .. } => "category",
            Action::Subcategory { .. } => "subcategory",
            Action::City { .. } => "city",
            Action::AddVacancy => "add_vacancy",
            Action::FormCity(_) => "form_city",
        }
    }

    /// Top-level navigation is valid from any state and resets the session first.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Action::Menu
                | Action::Back
                | Action::Profile
                | Action::Search(_)
                | Action::Entertainment
                | Action::EarnTogether
                | Action::Subscription
                | Action::FillForm
        )
    }

    pub fn encode(&self) -> String {
        match self {
            Action::Category { name, kind }
            | Action::Subcategory { name, kind }
            | Action::City { name, kind } => {
                format!("{}{d}{}{d}{}", self.tag(), name, kind, d = DELIMITER)
            }
            Action::FormCity(city) => format!("{}{}{}", self.tag(), DELIMITER, city),
            _ => self.tag().to_string(),
        }
    }

    pub fn decode(data: &str) -> Result<Self, CallbackError> {
        if data.is_empty() {
            return Err(CallbackError::Empty);
        }
        let mut parts = data.split(DELIMITER);
        let tag = parts.next().unwrap_or_default();
        let params: Vec<&str> = parts.collect();

        let expect = |expected: usize| -> Result<(), CallbackError> {
            if params.len() != expected {
                return Err(CallbackError::Arity {
                    tag: tag.to_string(),
                    expected,
                    found: params.len(),
                });
            }
            if params.iter().any(|p| p.is_empty()) {
                return Err(CallbackError::EmptyField(tag.to_string()));
            }
            Ok(())
        };

        let action = match tag {
            "menu" => expect(0).map(|_| Action::Menu)?,
            "back" => expect(0).map(|_| Action::Back)?,
            "profile" => expect(0).map(|_| Action::Profile)?,
            "search_employee" => expect(0).map(|_| Action::Search(SearchKind::Employee))?,
            "search_job" => expect(0).map(|_| Action::Search(SearchKind::Job))?,
            "entertainment" => expect(0).map(|_| Action::Entertainment)?,
            "earn_together" => expect(0).map(|_| Action::EarnTogether)?,
            "subscription" => expect(0).map(|_| Action::Subscription)?,
            "fill_form" => expect(0).map(|_| Action::FillForm)?,
            "add_vacancy" => expect(0).map(|_| Action::AddVacancy)?,
            "form_city" => {
                expect(1)?;
                Action::FormCity(params[0].to_string())
            }
            "category" | "subcategory" | "city" => {
                expect(2)?;
                let name = params[0].to_string();
                let kind: SearchKind = params[1].parse()?;
                match tag {
                    "category" => Action::Category { name, kind },
                    "subcategory" => Action::Subcategory { name, kind },
                    _ => Action::City { name, kind },
                }
            }
            other => return Err(CallbackError::UnknownTag(other.to_string())),
        };
        Ok(action)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Action {
    type Err = CallbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::decode(s)
    }
}
