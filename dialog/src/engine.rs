//! Dialog engine: pure transition from (session, inbound event) to (next session, effects).
//!
//! The engine never performs I/O. Every reply, delete, acknowledgement and persistence call is
//! returned as an [`Effect`] for the executor to run in order.

use std::sync::Arc;

use storage::{JobFilter, ProfileFields};
use tracing::debug;

use crate::callback::{Action, SearchKind};
use crate::catalog::Catalog;
use crate::effect::{Effect, PersistOp};
use crate::event::{Event, Inbound};
use crate::session::{DialogState, JobDraft, SearchFilters, Session};
use crate::views::{self, View};

/// Values shown in static screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Used in referral links.
    pub bot_username: String,
    pub subscription_price: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            bot_username: "work_kg_bot".to_string(),
            subscription_price: "500 сом/месяц".to_string(),
        }
    }
}

/// Result of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub session: Session,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn new(session: Session) -> Self {
        Self {
            session,
            effects: Vec::new(),
        }
    }

    fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    fn reply(&mut self, chat_id: i64, view: View) {
        self.effects.push(view.send(chat_id));
    }

    fn ask(&mut self, chat_id: i64, view: View) {
        self.effects.push(view.send_ephemeral(chat_id));
    }

    /// Back to Idle: drafts and filters dropped, pending wizard messages deleted.
    fn reset(&mut self, chat_id: i64) {
        let deletes = self.session.pending.flush(chat_id);
        self.effects.extend(deletes);
        self.session = Session::default();
    }
}

#[derive(Debug, Clone)]
pub struct DialogEngine {
    catalog: Arc<Catalog>,
    settings: EngineSettings,
}

impl DialogEngine {
    pub fn new(catalog: Arc<Catalog>, settings: EngineSettings) -> Self {
        Self { catalog, settings }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn transition(&self, session: &Session, inbound: &Inbound) -> Transition {
        let mut t = Transition::new(session.clone());
        match &inbound.event {
            Event::Command(name) => self.on_command(&mut t, inbound, name),
            Event::Button(action) => self.on_button(&mut t, inbound, action),
            Event::MalformedButton { data, error } => {
                debug!(data = %data, error = %error, "Ignoring malformed callback");
                if let Some(id) = &inbound.callback_id {
                    t.push(Effect::AnswerCallback {
                        callback_id: id.clone(),
                    });
                }
            }
            Event::Text(body) => self.on_text(&mut t, inbound, body),
        }
        t
    }

    fn on_command(&self, t: &mut Transition, inbound: &Inbound, name: &str) {
        let chat_id = inbound.chat_id;
        t.reset(chat_id);
        let view = match name {
            "start" => views::welcome(),
            "help" => views::help(),
            _ => views::main_menu(),
        };
        t.reply(chat_id, view);
    }

    /// Whether the action applies to the current state. Navigation always applies.
    fn accepts(&self, session: &Session, action: &Action) -> bool {
        if action.is_navigation() {
            return true;
        }
        match (action, &session.state) {
            (Action::Category { name, kind }, DialogState::SelectingCategory { kind: k }) => {
                kind == k && self.catalog.has_category(name)
            }
            (
                Action::Subcategory { name, kind },
                DialogState::SelectingSubcategory { kind: k, category },
            ) => kind == k && self.catalog.has_subcategory(category, name),
            (Action::City { name, kind }, DialogState::SelectingCity { kind: k, .. }) => {
                kind == k && self.catalog.has_city(name)
            }
            (Action::FormCity(city), DialogState::FormCity) => self.catalog.has_city(city),
            (Action::AddVacancy, DialogState::Idle) => session
                .search_filters
                .as_ref()
                .map(|f| f.kind == SearchKind::Employee && f.is_complete())
                .unwrap_or(false),
            _ => false,
        }
    }

    fn on_button(&self, t: &mut Transition, inbound: &Inbound, action: &Action) {
        let chat_id = inbound.chat_id;
        if let Some(id) = &inbound.callback_id {
            t.push(Effect::AnswerCallback {
                callback_id: id.clone(),
            });
        }

        if !self.accepts(&t.session, action) {
            debug!(
                action = %action,
                state = t.session.state.name(),
                "Button does not apply to current state"
            );
            return;
        }

        // Clean chat: drop the message carrying the button unless the wizard flush owns it.
        if let Some(origin) = inbound.message_id {
            if !t.session.pending.contains(origin) {
                t.push(Effect::DeleteMessage {
                    chat_id,
                    message_id: origin,
                });
            }
        }

        if action.is_navigation() {
            t.reset(chat_id);
        }

        match action {
            Action::Menu | Action::Back => t.reply(chat_id, views::main_menu()),
            Action::Profile => t.push(Effect::ShowProfile {
                chat_id,
                telegram_id: inbound.user.id,
            }),
            Action::Search(kind) => {
                t.session.state = DialogState::SelectingCategory { kind: *kind };
                t.session.search_filters = Some(SearchFilters::new(*kind));
                t.reply(chat_id, views::category_selection(&self.catalog, *kind));
            }
            Action::Entertainment => t.reply(chat_id, views::entertainment(inbound.message_id)),
            Action::EarnTogether => t.reply(
                chat_id,
                views::earn_together(&self.settings.bot_username, chat_id),
            ),
            Action::Subscription => t.reply(
                chat_id,
                views::subscription(&self.settings.subscription_price),
            ),
            Action::FillForm => {
                t.session.state = DialogState::FormName;
                t.session.draft_profile = Some(ProfileFields::default());
                t.ask(chat_id, View::text(views::FORM_NAME_PROMPT));
            }
            Action::Category { name, kind } => {
                t.session.state = DialogState::SelectingSubcategory {
                    kind: *kind,
                    category: name.clone(),
                };
                t.session
                    .search_filters
                    .get_or_insert_with(|| SearchFilters::new(*kind))
                    .category = Some(name.clone());
                t.reply(
                    chat_id,
                    views::subcategory_selection(&self.catalog, name, *kind),
                );
            }
            Action::Subcategory { name, kind } => {
                let category = match &t.session.state {
                    DialogState::SelectingSubcategory { category, .. } => category.clone(),
                    _ => return,
                };
                t.session.state = DialogState::SelectingCity {
                    kind: *kind,
                    category,
                    subcategory: name.clone(),
                };
                t.session
                    .search_filters
                    .get_or_insert_with(|| SearchFilters::new(*kind))
                    .subcategory = Some(name.clone());
                t.reply(chat_id, views::city_selection(&self.catalog, *kind));
            }
            Action::City { name, kind } => self.finish_search(t, inbound, name, *kind),
            Action::AddVacancy => {
                let draft = t
                    .session
                    .search_filters
                    .take()
                    .map(|f| JobDraft::seeded(&f))
                    .unwrap_or_default();
                t.session.state = DialogState::AwaitingJobTitle;
                t.session.draft_job = Some(draft);
                t.reply(chat_id, View::text(views::JOB_TITLE_PROMPT));
            }
            Action::FormCity(city) => {
                t.session
                    .draft_profile
                    .get_or_insert_with(ProfileFields::default)
                    .city = city.clone();
                t.session.state = DialogState::FormSpecialty;
                t.ask(chat_id, View::text(views::FORM_SPECIALTY_PROMPT));
            }
        }
    }

    fn finish_search(&self, t: &mut Transition, inbound: &Inbound, city: &str, kind: SearchKind) {
        let chat_id = inbound.chat_id;
        let (category, subcategory) = match &t.session.state {
            DialogState::SelectingCity {
                category,
                subcategory,
                ..
            } => (category.clone(), subcategory.clone()),
            _ => return,
        };

        match kind {
            SearchKind::Job => {
                t.session = Session::default();
                t.push(Effect::SearchJobs {
                    chat_id,
                    filter: JobFilter::new(&category, &subcategory, city),
                });
            }
            SearchKind::Employee => {
                let filters = SearchFilters {
                    kind,
                    category: Some(category),
                    subcategory: Some(subcategory),
                    city: Some(city.to_string()),
                };
                let view = views::add_vacancy_prompt(&filters);
                t.session = Session {
                    search_filters: Some(filters),
                    ..Session::default()
                };
                t.reply(chat_id, view);
            }
        }
    }

    fn on_text(&self, t: &mut Transition, inbound: &Inbound, body: &str) {
        let chat_id = inbound.chat_id;
        let state = t.session.state.clone();

        if state.is_job_wizard() {
            self.on_job_field(t, inbound, &state, body);
            return;
        }
        if state.is_profile_wizard() {
            if let Some(id) = inbound.message_id {
                t.session.pending.track(id);
            }
            self.on_profile_field(t, inbound, &state, body);
            return;
        }

        match state {
            DialogState::Idle => t.reply(chat_id, views::main_menu()),
            _ => debug!(state = state.name(), "Ignoring text during selection"),
        }
    }

    fn on_job_field(&self, t: &mut Transition, inbound: &Inbound, state: &DialogState, body: &str) {
        let chat_id = inbound.chat_id;
        let draft = t.session.draft_job.get_or_insert_with(JobDraft::default);
        let (next, prompt) = match state {
            DialogState::AwaitingJobTitle => {
                draft.title = body.to_string();
                (DialogState::AwaitingJobDescription, views::JOB_DESCRIPTION_PROMPT)
            }
            DialogState::AwaitingJobDescription => {
                draft.description = body.to_string();
                (DialogState::AwaitingJobSalary, views::JOB_SALARY_PROMPT)
            }
            DialogState::AwaitingJobSalary => {
                draft.salary = body.to_string();
                (DialogState::AwaitingJobPhone, views::JOB_PHONE_PROMPT)
            }
            DialogState::AwaitingJobPhone => {
                draft.phone = body.to_string();
                (DialogState::AwaitingJobCompany, views::JOB_COMPANY_PROMPT)
            }
            _ => {
                if body.trim() != views::NO_COMPANY {
                    draft.company = body.to_string();
                }
                let job = draft.clone().into_new_job(inbound.user.id);
                t.reset(chat_id);
                t.push(Effect::Persist(PersistOp::InsertJob(job)));
                t.reply(chat_id, View::text(views::JOB_SAVED));
                t.reply(chat_id, views::main_menu());
                return;
            }
        };
        t.session.state = next;
        t.reply(chat_id, View::text(prompt));
    }

    fn on_profile_field(
        &self,
        t: &mut Transition,
        inbound: &Inbound,
        state: &DialogState,
        body: &str,
    ) {
        let chat_id = inbound.chat_id;
        let draft = t
            .session
            .draft_profile
            .get_or_insert_with(ProfileFields::default);
        let (next, question) = match state {
            DialogState::FormName => {
                draft.name = body.to_string();
                (DialogState::FormPhone, View::text(views::FORM_PHONE_PROMPT))
            }
            DialogState::FormPhone => {
                draft.phone = body.to_string();
                (DialogState::FormCity, views::form_city_question(&self.catalog))
            }
            DialogState::FormCity => {
                draft.city = body.to_string();
                (DialogState::FormSpecialty, View::text(views::FORM_SPECIALTY_PROMPT))
            }
            DialogState::FormSpecialty => {
                draft.specialty = body.to_string();
                (DialogState::FormExperience, View::text(views::FORM_EXPERIENCE_PROMPT))
            }
            _ => {
                draft.experience = body.to_string();
                let profile = draft.clone();
                self.finish_profile(t, inbound, profile);
                return;
            }
        };
        t.session.state = next;
        t.ask(chat_id, question);
    }

    fn finish_profile(&self, t: &mut Transition, inbound: &Inbound, profile: ProfileFields) {
        let chat_id = inbound.chat_id;
        let telegram_id = inbound.user.id;
        t.reset(chat_id);
        t.push(Effect::Persist(PersistOp::UpsertUserProfile {
            telegram_id,
            profile: profile.clone(),
        }));
        t.push(Effect::Persist(PersistOp::UpsertResume {
            telegram_id,
            username: inbound.user.username.clone(),
            profile: profile.clone(),
        }));
        t.reply(chat_id, views::form_summary(&profile));
    }
}
