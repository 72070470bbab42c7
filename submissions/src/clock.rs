use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// Source of the current instant, swapped for a fixed one in tests.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of fresh item identifiers.
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// `2024-05-01T10:00:00.000Z`
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[test]
fn test_iso_timestamp_millis_zulu() {
    let at = DateTime::parse_from_rfc3339("2024-05-01T10:00:00.5+00:00").unwrap().with_timezone(&Utc);
    assert_eq!(iso_timestamp(at), "2024-05-01T10:00:00.500Z");
}

#[test]
fn test_uuid_generator_is_unique() {
    let ids = UuidGenerator;
    let a = ids.next_id();
    let b = ids.next_id();
    assert_ne!(a, b);
    assert!(Uuid::parse_str(&a).is_ok());
}
