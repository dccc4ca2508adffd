//! Grouping of discovered participants into pools and lanes.
//!
//! Membership is fixed: three named categories plus a catch-all. Buckets with
//! no members produce no pool. With fewer than two participants there is
//! nothing to partition, so a single pool without lanes is used.

use super::{Lane, Pool};

const BUSINESS: &[&str] = &["клиент", "менеджер", "руководитель", "аналитик"];
const TECHNICAL: &[&str] = &["разработчик", "qa", "архитектор", "дизайнер", "система"];
const OPERATIONAL: &[&str] = &["логистика", "склад", "отдел продаж", "бухгалтерия"];

const DEFAULT_POOL_NAME: &str = "Основной процесс";

pub(crate) fn partition(participants: &[String]) -> Vec<Pool> {
    match participants {
        [] => vec![Pool {
            id: "Pool_1".into(),
            name: DEFAULT_POOL_NAME.into(),
            lanes: Vec::new(),
        }],
        [single] => vec![Pool {
            id: "Pool_1".into(),
            name: single.clone(),
            lanes: Vec::new(),
        }],
        _ => {
            let business = members_of(participants, BUSINESS);
            let technical = members_of(participants, TECHNICAL);
            let operational = members_of(participants, OPERATIONAL);
            let other: Vec<&String> = participants
                .iter()
                .filter(|p| {
                    !business.contains(p) && !technical.contains(p) && !operational.contains(p)
                })
                .collect();

            [
                ("Pool_Business", "Бизнес-процессы", business),
                ("Pool_Technical", "Технические процессы", technical),
                ("Pool_Operational", "Операционные процессы", operational),
                ("Pool_Other", "Дополнительные процессы", other),
            ]
            .into_iter()
            .filter(|(_, _, members)| !members.is_empty())
            .map(|(id, name, members)| Pool {
                id: id.into(),
                name: name.into(),
                lanes: members
                    .into_iter()
                    .map(|p| Lane {
                        id: format!("Lane_{p}"),
                        name: p.clone(),
                    })
                    .collect(),
            })
            .collect()
        }
    }
}

// Case-insensitive exact match against the category's role names.
fn members_of<'a>(participants: &'a [String], names: &[&str]) -> Vec<&'a String> {
    participants
        .iter()
        .filter(|p| {
            let lower = p.to_lowercase();
            names.contains(&lower.as_str())
        })
        .collect()
}
