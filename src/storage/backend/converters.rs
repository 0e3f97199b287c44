use sea_orm::ActiveValue::Set;

use crate::storage::models::{CalendarStat, Event};
use migration::entities::{calendar_stat, event};

pub fn model_to_stat(model: calendar_stat::Model) -> CalendarStat {
    CalendarStat {
        event_id: model.event_id,
        platform: model.platform,
        count: model.count,
    }
}

pub fn model_to_event(model: event::Model) -> Event {
    Event {
        id: model.id,
        name: model.name,
        description: model.description,
    }
}

pub fn event_to_active_model(event: &Event) -> event::ActiveModel {
    event::ActiveModel {
        id: Set(event.id.clone()),
        name: Set(event.name.clone()),
        description: Set(event.description.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;

    #[test]
    fn test_model_to_stat_keeps_stored_count() {
        // 读取原样返回，负数只在汇总时按 0 计
        let stat = model_to_stat(calendar_stat::Model {
            event_id: "fest".to_string(),
            platform: "google".to_string(),
            count: -3,
        });
        assert_eq!(stat.count, -3);
        assert_eq!(stat.platform, "google");
    }

    #[test]
    fn test_event_to_active_model_sets_all_columns() {
        let event = Event {
            id: "fest".to_string(),
            name: "Fest".to_string(),
            description: Some("outdoor".to_string()),
        };
        let am = event_to_active_model(&event);
        assert_eq!(am.id, ActiveValue::Set("fest".to_string()));
        assert_eq!(am.name, ActiveValue::Set("Fest".to_string()));
        assert_eq!(am.description, ActiveValue::Set(Some("outdoor".to_string())));
    }
}
