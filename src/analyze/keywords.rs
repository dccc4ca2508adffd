//! Static keyword tables used by the line classifier and participant resolver.
//!
//! All matching is done against lower-cased text, so the patterns are stored
//! lower-cased. Order matters: the first matching entry wins.

/// Known role names paired with their display form. Searched as substrings
/// in the order given.
pub(super) const ROLE_NAMES: &[(&str, &str)] = &[
    ("клиент", "Клиент"),
    ("менеджер", "Менеджер"),
    ("разработчик", "Разработчик"),
    ("qa", "QA"),
    ("тестировщик", "Тестировщик"),
    ("архитектор", "Архитектор"),
    ("дизайнер", "Дизайнер"),
    ("аналитик", "Аналитик"),
    ("руководитель", "Руководитель"),
    ("сотрудник", "Сотрудник"),
    ("специалист", "Специалист"),
    ("команда", "Команда"),
    ("отдел", "Отдел"),
    ("система", "Система"),
    ("поставщик", "Поставщик"),
    ("подрядчик", "Подрядчик"),
    ("консультант", "Консультант"),
    ("аудитор", "Аудитор"),
    ("логистика", "Логистика"),
    ("склад", "Склад"),
    ("отдел продаж", "Отдел продаж"),
    ("бухгалтерия", "Бухгалтерия"),
    ("юрист", "Юрист"),
    ("маркетолог", "Маркетолог"),
    ("контент-менеджер", "Контент-менеджер"),
];

/// Contextual fallback when no role name appears in the task text: verb and
/// noun groups mapped to the role they imply.
pub(super) const CONTEXT_ROLES: &[(&[&str], &str)] = &[
    (&["выбирает", "добавляет", "оформляет", "получает"], "Клиент"),
    (
        &["проверяет", "провер", "подтверждается", "отменяется"],
        "Система",
    ),
    (&["передается", "передач"], "Менеджер"),
    (
        &[
            "упаковывается",
            "отправляется",
            "упаковываются",
            "отправляются",
        ],
        "Логистика",
    ),
    (&["наличие", "склад"], "Склад"),
];

/// Used when neither a role name nor a context group matches.
pub(super) const DEFAULT_PARTICIPANT: &str = "Участник";

/// Conditional tokens marking an exclusive decision. Substring match is
/// case-sensitive on purpose; the condition extraction itself is not.
pub(super) const CONDITION_TOKENS: &[&str] = &["если", "Если"];

/// Markers for simultaneous activities, classified as a parallel gateway.
pub(super) const PARALLEL_TOKENS: &[&str] = &["параллельно", "одновременно"];
