//! Per-user conversation state.

use serde::{Deserialize, Serialize};
use storage::{JobSource, NewJob, ProfileFields};

use crate::callback::SearchKind;
use crate::lifecycle::PendingMessages;

/// Where a user is in a wizard. Flat: every step carries the parameters it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogState {
    #[default]
    Idle,
    SelectingCategory {
        kind: SearchKind,
    },
    SelectingSubcategory {
        kind: SearchKind,
        category: String,
    },
    SelectingCity {
        kind: SearchKind,
        category: String,
        subcategory: String,
    },
    AwaitingJobTitle,
    AwaitingJobDescription,
    AwaitingJobSalary,
    AwaitingJobPhone,
    AwaitingJobCompany,
    FormName,
    FormPhone,
    FormCity,
    FormSpecialty,
    FormExperience,
}

impl DialogState {
    pub fn name(&self) -> &'static str {
        match self {
            DialogState::Idle => "idle",
            DialogState::SelectingCategory { .. } => "selecting_category",
            DialogState::SelectingSubcategory { .. } => "selecting_subcategory",
            DialogState::SelectingCity { .. } => "selecting_city",
            DialogState::AwaitingJobTitle => "awaiting_job_title",
            DialogState::AwaitingJobDescription => "awaiting_job_description",
            DialogState::AwaitingJobSalary => "awaiting_job_salary",
            DialogState::AwaitingJobPhone => "awaiting_job_phone",
            DialogState::AwaitingJobCompany => "awaiting_job_company",
            DialogState::FormName => "form_name",
            DialogState::FormPhone => "form_phone",
            DialogState::FormCity => "form_city",
            DialogState::FormSpecialty => "form_specialty",
            DialogState::FormExperience => "form_experience",
        }
    }

    pub fn is_selecting(&self) -> bool {
        matches!(
            self,
            DialogState::SelectingCategory { .. }
                | DialogState::SelectingSubcategory { .. }
                | DialogState::SelectingCity { .. }
        )
    }

    pub fn is_job_wizard(&self) -> bool {
        matches!(
            self,
            DialogState::AwaitingJobTitle
                | DialogState::AwaitingJobDescription
                | DialogState::AwaitingJobSalary
                | DialogState::AwaitingJobPhone
                | DialogState::AwaitingJobCompany
        )
    }

    pub fn is_profile_wizard(&self) -> bool {
        matches!(
            self,
            DialogState::FormName
                | DialogState::FormPhone
                | DialogState::FormCity
                | DialogState::FormSpecialty
                | DialogState::FormExperience
        )
    }
}

/// Category, subcategory and city picked so far in a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub kind: SearchKind,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub city: Option<String>,
}

impl SearchFilters {
    pub fn new(kind: SearchKind) -> Self {
        Self {
            kind,
            category: None,
            subcategory: None,
            city: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.category.is_some() && self.subcategory.is_some() && self.city.is_some()
    }
}

/// Vacancy being typed in. Category, subcategory and city come from the employee search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDraft {
    pub category: String,
    pub subcategory: String,
    pub city: String,
    pub title: String,
    pub description: String,
    pub salary: String,
    pub phone: String,
    pub company: String,
}

impl JobDraft {
    pub fn seeded(filters: &SearchFilters) -> Self {
        Self {
            category: filters.category.clone().unwrap_or_default(),
            subcategory: filters.subcategory.clone().unwrap_or_default(),
            city: filters.city.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn into_new_job(self, created_by: i64) -> NewJob {
        NewJob {
            title: self.title,
            description: self.description,
            category: self.category,
            subcategory: self.subcategory,
            city: self.city,
            salary: self.salary,
            phone: self.phone,
            company: self.company,
            created_by: Some(created_by),
            source: JobSource::Telegram,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub state: DialogState,
    pub search_filters: Option<SearchFilters>,
    pub draft_job: Option<JobDraft>,
    pub draft_profile: Option<ProfileFields>,
    pub pending: PendingMessages,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.state == DialogState::Idle
    }

    /// Drafts match the state, and an idle session has no drafts or pending ids.
    pub fn is_consistent(&self) -> bool {
        if self.draft_job.is_some() && self.draft_profile.is_some() {
            return false;
        }
        if self.draft_job.is_some() != self.state.is_job_wizard() {
            return false;
        }
        if self.draft_profile.is_some() != self.state.is_profile_wizard() {
            return false;
        }
        if !self.state.is_profile_wizard() && !self.pending.is_empty() {
            return false;
        }
        true
    }
}
