//! User-facing texts and keyboards.

use dbot_core::{Button, Keyboard, MessageId};
use storage::{JobRecord, ProfileFields, UserRecord};

use crate::callback::{Action, SearchKind};
use crate::catalog::Catalog;
use crate::effect::Effect;
use crate::session::SearchFilters;

/// Text plus optional inline keyboard, ready to become a send effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl View {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }

    pub fn send(self, chat_id: i64) -> Effect {
        Effect::send(chat_id, self.text, self.keyboard)
    }

    pub fn send_ephemeral(self, chat_id: i64) -> Effect {
        Effect::send_ephemeral(chat_id, self.text, self.keyboard)
    }
}

fn button(label: &str, action: Action) -> Button {
    Button::new(label, action.encode())
}

fn back_to_menu() -> Keyboard {
    Keyboard::new().row(vec![button("⬅️ Назад", Action::Menu)])
}

pub const JOKES: &[&str] = &[
    "Почему программисты не любят природу? Слишком много багов! 🐛",
    "Как называется группа программистов? Git-ара! 🎸",
    "Почему Java-разработчик носит очки? Потому что он не видит C#! 👓",
];

pub const JOB_TITLE_PROMPT: &str = "Введите название вакансии:";
pub const JOB_DESCRIPTION_PROMPT: &str = "Введите описание вакансии:";
pub const JOB_SALARY_PROMPT: &str = "Введите зарплату (например: 30000-50000 сом):";
pub const JOB_PHONE_PROMPT: &str = "Введите контактный телефон:";
pub const JOB_COMPANY_PROMPT: &str = "Введите название компании (или '-' если нет):";
pub const JOB_SAVED: &str = "✅ Вакансия успешно добавлена!";

/// Company answer meaning "no company".
pub const NO_COMPANY: &str = "-";

pub const FORM_NAME_PROMPT: &str = "📝 Заполнение анкеты\n\nВведите ваше имя:";
pub const FORM_PHONE_PROMPT: &str = "Введите ваш номер телефона (+996 XXX XXX XXX):";
pub const FORM_CITY_PROMPT: &str = "Выберите ваш город или введите свой:";
pub const FORM_SPECIALTY_PROMPT: &str = "Введите вашу специальность:";
pub const FORM_EXPERIENCE_PROMPT: &str = "Опишите ваш опыт работы:";

pub const GENERIC_FAILURE: &str = "⚠️ Что-то пошло не так. Попробуйте ещё раз позже.";
pub const SEARCH_FAILURE: &str = "Ошибка при поиске вакансий";

pub fn welcome() -> View {
    let text = "⚠️ Инструкция по использованию ⚠️

1️⃣ Заполнить анкету - Самый важный пункт. Для того чтобы с вами связались работники/работодатели

2️⃣ Поиск сотрудника - В этом разделе вы можете быстро найти временного и постоянного работника/сотрудника

3️⃣ Поиск работы - В этом разделе вы можете быстро найти временную и постоянную работу

4️⃣ Развлечение - В этом разделе вы можете разгрузить себя от суеты шутками и способами

5️⃣ Зарабатывать вместе - в этом разделе вы можете зарабатывать с нами, выполняя разные задачи.";

    View::with_keyboard(
        text,
        Keyboard::new()
            .row(vec![button("👍 Ознакомился", Action::Menu)])
            .row(vec![button("📝 Заполнить анкету", Action::FillForm)]),
    )
}

pub fn main_menu() -> View {
    View::with_keyboard(
        "💵 💵 Главное меню 💵 💵",
        Keyboard::new()
            .row(vec![button("Личный кабинет 📁", Action::Profile)])
            .row(vec![
                button("Поиск сотрудника 👷", Action::Search(SearchKind::Employee)),
                button("Поиск работы 😌", Action::Search(SearchKind::Job)),
            ])
            .row(vec![
                button("Развлечение 😊", Action::Entertainment),
                button("Зарабатывать вместе 💸", Action::EarnTogether),
            ])
            .row(vec![button("Приобрести подписку ✅", Action::Subscription)])
            .row(vec![button("назад ⬅️", Action::Back)]),
    )
}

pub fn help() -> View {
    View::text(
        "❓ Помощь

Команды бота:
/start - Начать работу с ботом
/menu - Главное меню
/help - Помощь

По всем вопросам обращайтесь к администратору.",
    )
}

pub fn category_selection(catalog: &Catalog, kind: SearchKind) -> View {
    let text = match kind {
        SearchKind::Employee => "Мы в разделе поиска сотрудника!\nВыберите в какой сфере ищем. 👇",
        SearchKind::Job => "Мы в разделе поиска работы!\nВыберите в какой сфере ищем. 👇",
    };

    let mut keyboard = Keyboard::new();
    for category in &catalog.categories {
        let label = if category.emoji.is_empty() {
            category.name.clone()
        } else {
            format!("{} {}", category.name, category.emoji)
        };
        keyboard = keyboard.row(vec![button(
            &label,
            Action::Category {
                name: category.name.clone(),
                kind,
            },
        )]);
    }
    View::with_keyboard(text, keyboard.row(vec![button("⬅️ Назад", Action::Menu)]))
}

/// Subcategories two per row; "back" restarts the same search.
pub fn subcategory_selection(catalog: &Catalog, category: &str, kind: SearchKind) -> View {
    let text = format!("Выберите узкую специальность {}! 👇", category.to_lowercase());

    let subcategories = catalog
        .category(category)
        .map(|c| c.subcategories.as_slice())
        .unwrap_or_default();

    let mut keyboard = Keyboard::new();
    for pair in subcategories.chunks(2) {
        keyboard = keyboard.row(
            pair.iter()
                .map(|name| {
                    button(
                        name,
                        Action::Subcategory {
                            name: name.clone(),
                            kind,
                        },
                    )
                })
                .collect(),
        );
    }
    View::with_keyboard(
        text,
        keyboard.row(vec![button("⬅️ Назад", Action::Search(kind))]),
    )
}

fn city_rows(catalog: &Catalog, to_button: impl Fn(&str) -> Button) -> Keyboard {
    catalog
        .cities
        .chunks(3)
        .fold(Keyboard::new(), |keyboard, chunk| {
            keyboard.row(chunk.iter().map(|city| to_button(city)).collect())
        })
}

pub fn city_selection(catalog: &Catalog, kind: SearchKind) -> View {
    let keyboard = city_rows(catalog, |city| {
        button(
            &format!("{} 🇰🇬", city),
            Action::City {
                name: city.to_string(),
                kind,
            },
        )
    });
    View::with_keyboard(
        "Выберите ваш город 👇",
        keyboard.row(vec![button("⬅️ Назад", Action::Menu)]),
    )
}

pub fn form_city_question(catalog: &Catalog) -> View {
    let keyboard = city_rows(catalog, |city| {
        button(city, Action::FormCity(city.to_string()))
    });
    View::with_keyboard(FORM_CITY_PROMPT, keyboard)
}

pub fn add_vacancy_prompt(filters: &SearchFilters) -> View {
    let text = format!(
        "📋 Поиск сотрудника\n\n📂 Категория: {} / {}\n📍 Город: {}\n\nВы можете добавить вакансию, чтобы найти сотрудника.",
        filters.category.as_deref().unwrap_or_default(),
        filters.subcategory.as_deref().unwrap_or_default(),
        filters.city.as_deref().unwrap_or_default(),
    );
    View::with_keyboard(
        text,
        Keyboard::new()
            .row(vec![button("➕ Добавить вакансию", Action::AddVacancy)])
            .row(vec![button("🏠 Главное меню", Action::Menu)]),
    )
}

pub fn job_card(job: &JobRecord) -> View {
    let mut text = format!("📋 {}\n\n", job.title);
    text.push_str(&format!("📍 Город: {}\n", job.city));
    text.push_str(&format!(
        "📂 Категория: {} / {}\n",
        job.category, job.subcategory
    ));
    if !job.salary.is_empty() {
        text.push_str(&format!("💰 Зарплата: {}\n", job.salary));
    }
    if !job.company.is_empty() {
        text.push_str(&format!("🏢 Компания: {}\n", job.company));
    }
    if !job.description.is_empty() {
        text.push_str(&format!("\n📝 {}\n", job.description));
    }
    text.push_str(&format!("\n📞 Контакт: {}", job.phone));
    View::text(text)
}

pub fn jobs_found(count: usize) -> View {
    View::with_keyboard(
        format!("Найдено {} вакансий", count),
        Keyboard::new().row(vec![
            button("🔍 Искать ещё", Action::Search(SearchKind::Job)),
            button("🏠 Главное меню", Action::Menu),
        ]),
    )
}

pub fn no_jobs() -> View {
    View::with_keyboard(
        "😔 К сожалению, вакансий по вашему запросу не найдено.\n\nПопробуйте изменить параметры поиска.",
        Keyboard::new().row(vec![
            button("🔍 Искать снова", Action::Search(SearchKind::Job)),
            button("🏠 Главное меню", Action::Menu),
        ]),
    )
}

pub fn profile(user: &UserRecord) -> View {
    let mut text = String::from("📁 Личный кабинет\n\n");
    let full_name = [user.first_name.as_deref(), user.last_name.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    text.push_str(&format!("👤 Имя: {}\n", full_name));

    let optional = [
        ("📱 Username: @", user.username.as_deref()),
        ("📞 Телефон: ", user.phone.as_deref()),
        ("📍 Город: ", user.city.as_deref()),
        ("💼 Специальность: ", user.specialty.as_deref()),
        ("📝 Опыт: ", user.experience.as_deref()),
    ];
    for (label, value) in optional {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            text.push_str(&format!("{}{}\n", label, value));
        }
    }
    text.push_str(&format!(
        "📅 Дата регистрации: {}",
        user.created_at.format("%d.%m.%Y")
    ));

    View::with_keyboard(
        text,
        Keyboard::new()
            .row(vec![button("📝 Редактировать анкету", Action::FillForm)])
            .row(vec![button("⬅️ Назад", Action::Menu)]),
    )
}

pub fn profile_missing() -> View {
    View::with_keyboard(
        "📁 Личный кабинет\n\nПрофиль не найден. Заполните анкету для создания профиля.",
        Keyboard::new()
            .row(vec![button("📝 Заполнить анкету", Action::FillForm)])
            .row(vec![button("⬅️ Назад", Action::Menu)]),
    )
}

pub fn form_summary(profile: &ProfileFields) -> View {
    let text = format!(
        "✅ Ваша анкета сохранена!

📋 Ваши данные:

👤 Имя: {}
📞 Телефон: {}
📍 Город: {}
💼 Специальность: {}
📝 Опыт: {}

Работодатели смогут с вами связаться.",
        profile.name, profile.phone, profile.city, profile.specialty, profile.experience
    );
    View::with_keyboard(
        text,
        Keyboard::new().row(vec![
            button("📝 Изменить анкету", Action::FillForm),
            button("🏠 Главное меню", Action::Menu),
        ]),
    )
}

/// Joke chosen by the id of the message the button was on, so repeated presses vary.
pub fn entertainment(seed: Option<MessageId>) -> View {
    let index = seed.map(|id| id.unsigned_abs() as usize).unwrap_or(0) % JOKES.len();
    View::with_keyboard(
        format!("😊 Развлечение\n\n{}", JOKES[index]),
        Keyboard::new()
            .row(vec![button("😂 Ещё шутку", Action::Entertainment)])
            .row(vec![button("⬅️ Назад", Action::Menu)]),
    )
}

pub fn referral_link(bot_username: &str, chat_id: i64) -> String {
    format!("t.me/{}?start=ref_{}", bot_username, chat_id)
}

pub fn earn_together(bot_username: &str, chat_id: i64) -> View {
    let text = format!(
        "💸 Зарабатывать вместе

Приглашайте друзей и получайте бонусы!

За каждого приглашённого друга вы получите:
• 100 бонусных баллов
• Приоритетный показ вашей анкеты

Ваша реферальная ссылка: {}",
        referral_link(bot_username, chat_id)
    );
    View::with_keyboard(text, back_to_menu())
}

pub fn subscription(price: &str) -> View {
    let text = format!(
        "✅ Подписка

Преимущества подписки:
• Приоритетный показ вашей анкеты
• Доступ к премиум вакансиям
• Уведомления о новых вакансиях

Стоимость: {}

Для оплаты свяжитесь с администратором.",
        price
    );
    View::with_keyboard(text, back_to_menu())
}
