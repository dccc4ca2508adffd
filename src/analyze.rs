//! Rule based text analysis: classify lines of a process description and
//! resolve the responsible participant for a task.
//!
//! There is no grammar here. A line either carries a `<digits>.` prefix and
//! becomes a task, mentions a conditional or parallel marker and becomes a
//! gateway, or is ignored.

mod keywords;

use crate::model::TaskType;
use keywords::*;
use regex::Regex;
use std::sync::LazyLock;

static NUMBERED_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*").expect("valid regex"));

// Lazy up to and including the first conditional token, any case.
static CONDITION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^.*?если\s*").expect("valid regex"));

/// What a single non-blank line of the description turned out to be.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum LineKind {
    /// Numbered step with the prefix stripped.
    Task(String),
    /// Conditional sentence, reduced to the condition text.
    Exclusive(String),
    /// Line mentioning simultaneous work, kept verbatim.
    Parallel(String),
}

/// Classify one trimmed line. A numbered prefix wins over everything else,
/// so `5. Если ...` is a task, not a decision.
pub(crate) fn classify(line: &str) -> Option<LineKind> {
    if NUMBERED_PREFIX.is_match(line) {
        return Some(LineKind::Task(NUMBERED_PREFIX.replace(line, "").into_owned()));
    }
    if CONDITION_TOKENS.iter().any(|token| line.contains(token)) {
        return Some(LineKind::Exclusive(extract_condition(line)));
    }
    if PARALLEL_TOKENS.iter().any(|token| line.contains(token)) {
        return Some(LineKind::Parallel(line.to_string()));
    }
    None
}

// Strip everything up to the conditional token and cut at the first
// sentence-ending punctuation: "Если товаров нет, заказ отменяется"
// becomes "товаров нет".
fn extract_condition(line: &str) -> String {
    let stripped = CONDITION_PREFIX.replace(line, "");
    match stripped.find(['.', ',']) {
        Some(end) => stripped[..end].to_string(),
        None => stripped.into_owned(),
    }
}

/// Resolve the participant responsible for a task. Role names are checked
/// first, then the contextual verb groups. Always returns something; the
/// fallback is a generic participant label.
pub(crate) fn resolve_participant(text: &str) -> String {
    let lower = text.to_lowercase();

    for (pattern, display) in ROLE_NAMES {
        if lower.contains(pattern) {
            return (*display).to_string();
        }
    }

    for (group, display) in CONTEXT_ROLES {
        if group.iter().any(|keyword| lower.contains(keyword)) {
            return (*display).to_string();
        }
    }

    DEFAULT_PARTICIPANT.to_string()
}

/// Pick the BPMN task type from keywords in the task text.
pub(crate) fn task_type(text: &str) -> TaskType {
    let lower = text.to_lowercase();
    let contains = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if contains(&["провер", "анализ", "выбирает", "добавляет", "оформляет"]) {
        TaskType::User
    } else if contains(&["отправ", "передач", "передается"]) {
        TaskType::Send
    } else if contains(&["получ", "прием", "получает"]) {
        TaskType::Receive
    } else if contains(&["автомат", "система", "подтверждается", "отменяется"]) {
        TaskType::Service
    } else if contains(&["упаковывается", "отправляется"]) {
        TaskType::User
    } else {
        TaskType::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_line_is_a_task() {
        assert_eq!(
            classify("1. Клиент выбирает товары на сайте"),
            Some(LineKind::Task("Клиент выбирает товары на сайте".into()))
        );
        assert_eq!(
            classify("12.Менеджер проверяет заявку"),
            Some(LineKind::Task("Менеджер проверяет заявку".into()))
        );
    }

    #[test]
    fn numbered_line_wins_over_condition() {
        assert_eq!(
            classify("5. Если товары есть, заказ подтверждается"),
            Some(LineKind::Task("Если товары есть, заказ подтверждается".into()))
        );
    }

    #[test]
    fn condition_is_stripped_and_truncated() {
        assert_eq!(
            classify("Если товаров нет, заказ отменяется"),
            Some(LineKind::Exclusive("товаров нет".into()))
        );
        assert_eq!(
            classify("Проверить: если клиент согласен. Иначе завершить"),
            Some(LineKind::Exclusive("клиент согласен".into()))
        );
    }

    #[test]
    fn parallel_marker_keeps_the_line() {
        assert_eq!(
            classify("Отделы работают параллельно"),
            Some(LineKind::Parallel("Отделы работают параллельно".into()))
        );
    }

    #[test]
    fn unmatched_line_is_ignored() {
        assert_eq!(classify("Примечание для читателя"), None);
    }

    #[test]
    fn role_name_beats_context() {
        assert_eq!(resolve_participant("Клиент оформляет заказ"), "Клиент");
        assert_eq!(resolve_participant("Менеджер проверяет заявку"), "Менеджер");
        // "отдел" is earlier in the role list than "логистика"
        assert_eq!(
            resolve_participant("Заказ передается в отдел логистики"),
            "Отдел"
        );
    }

    #[test]
    fn context_fallback() {
        assert_eq!(resolve_participant("Добавляет товары в корзину"), "Клиент");
        assert_eq!(resolve_participant("Заказ отменяется"), "Система");
        assert_eq!(resolve_participant("Документы передаются дальше"), "Менеджер");
        assert_eq!(
            resolve_participant("Товары упаковываются для доставки"),
            "Логистика"
        );
    }

    #[test]
    fn default_participant() {
        assert_eq!(resolve_participant("Заявка рассматривается"), "Участник");
    }

    #[test]
    fn task_types() {
        assert_eq!(task_type("Проверяет наличие товаров"), TaskType::User);
        assert_eq!(task_type("Отправляет уведомление"), TaskType::Send);
        assert_eq!(task_type("Получает товары"), TaskType::Receive);
        assert_eq!(task_type("Заказ отменяется"), TaskType::Service);
        assert_eq!(task_type("Составляет договор"), TaskType::User);
    }
}
