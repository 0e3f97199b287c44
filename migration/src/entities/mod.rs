pub mod calendar_stat;
pub mod event;

pub use calendar_stat::Entity as CalendarStatEntity;
pub use event::Entity as EventEntity;
