//! Diagram interchange geometry. Everything is placed on a fixed grid so the
//! output is deterministic: pools are stacked vertically, flow nodes march
//! left to right in chain order.

use crate::model::{Pool, Task};

pub(super) const POOL_X: u32 = 50;
pub(super) const POOL_WIDTH: u32 = 900;
const POOL_STRIDE: u32 = 250;
const POOL_Y_OFFSET: u32 = 50;
const POOL_HEIGHT_WITH_LANES: u32 = 200;
const POOL_HEIGHT_PLAIN: u32 = 150;

const CHAIN_X: u32 = 250;
const CHAIN_STRIDE: u32 = 200;
const DEFAULT_TASK_Y: u32 = 80;

pub(super) const EVENT_SIZE: u32 = 36;
pub(super) const TASK_WIDTH: u32 = 100;
pub(super) const TASK_HEIGHT: u32 = 80;
pub(super) const GATEWAY_SIZE: u32 = 50;
pub(super) const GATEWAY_Y: u32 = 95;
pub(super) const EVENT_Y: u32 = 102;

pub(super) fn pool_y(pool_index: usize) -> u32 {
    pool_index as u32 * POOL_STRIDE + POOL_Y_OFFSET
}

pub(super) fn pool_height(pool: &Pool) -> u32 {
    if pool.lanes.is_empty() {
        POOL_HEIGHT_PLAIN
    } else {
        POOL_HEIGHT_WITH_LANES
    }
}

/// Lanes divide the pool width evenly; the remainder is simply dropped.
pub(super) fn lane_width(lane_count: usize) -> u32 {
    POOL_WIDTH / lane_count as u32
}

pub(super) fn lane_x(lane_index: usize, width: u32) -> u32 {
    POOL_X + lane_index as u32 * width
}

/// X position of the nth element in the start-to-end chain.
pub(super) fn chain_x(position: usize) -> u32 {
    CHAIN_X + position as u32 * CHAIN_STRIDE
}

/// A task sits inside the pool whose lanes contain its participant, or at the
/// default row when no lane matches (single-pool diagrams have no lanes).
pub(super) fn task_y(task: &Task, pools: &[Pool]) -> u32 {
    for (index, pool) in pools.iter().enumerate() {
        if pool.lanes.iter().any(|lane| lane.name == task.participant) {
            return DEFAULT_TASK_Y + index as u32 * POOL_STRIDE + POOL_Y_OFFSET;
        }
    }
    DEFAULT_TASK_Y
}

/// X position of the start event shape. Fixed, left of the chain.
pub(super) const START_X: u32 = 152;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Lane, TaskType};

    fn pool(id: &str, lanes: &[&str]) -> Pool {
        Pool {
            id: id.into(),
            name: id.into(),
            lanes: lanes
                .iter()
                .map(|l| Lane {
                    id: format!("Lane_{l}"),
                    name: (*l).into(),
                })
                .collect(),
        }
    }

    fn task(participant: &str) -> Task {
        Task {
            id: "Task_1".into(),
            name: String::new(),
            participant: participant.into(),
            task_type: TaskType::User,
            source_index: 0,
        }
    }

    #[test]
    fn pools_are_stacked() {
        assert_eq!(pool_y(0), 50);
        assert_eq!(pool_y(1), 300);
        assert_eq!(pool_y(2), 550);
    }

    #[test]
    fn lane_split_is_even() {
        assert_eq!(lane_width(2), 450);
        assert_eq!(lane_width(3), 300);
        assert_eq!(lane_x(0, 450), 50);
        assert_eq!(lane_x(1, 450), 500);
    }

    #[test]
    fn task_lands_in_its_pool() {
        let pools = [pool("Pool_Business", &["Клиент"]), pool("Pool_Other", &["Аудитор"])];
        assert_eq!(task_y(&task("Клиент"), &pools), 130);
        assert_eq!(task_y(&task("Аудитор"), &pools), 380);
        assert_eq!(task_y(&task("Неизвестный"), &pools), 80);
    }

    #[test]
    fn chain_marches_right() {
        assert_eq!(chain_x(0), 250);
        assert_eq!(chain_x(3), 850);
    }
}
