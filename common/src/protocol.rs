//! Line protocol decoder.
//!
//! The NAS-side collector writes one ASCII record per line:
//!
//! ```text
//! UPDATE:<sys>,<d1>,<d2>,<d3>,<d4>,<d5>,<health>
//! NETWORK:<mac>,<ipv4>,<ipv6>
//! POOL:RESET
//! POOL:<name>,<capacity>,<usage>,<state>
//! ```
//!
//! Decoding is split in two: [`Command::parse`] classifies a line without
//! touching any state, and [`apply`] folds a command into the
//! [`TelemetrySnapshot`]. Input is never rejected. Short lines stop early,
//! extra fields are ignored, unparseable temperatures read as `0.0`.

use core::str::Split;

use crate::telemetry::{PoolRecord, TelemetrySnapshot, assign};

// =============================================================================
// Wire Format
// =============================================================================

pub const UPDATE_PREFIX: &str = "UPDATE:";
pub const NETWORK_PREFIX: &str = "NETWORK:";
pub const POOL_PREFIX: &str = "POOL:";

/// `POOL:` payload that clears the pool list.
pub const POOL_RESET: &str = "RESET";

/// Field separator inside a payload.
pub const SEPARATOR: char = ',';

/// Six temperatures plus the storage health label.
pub const UPDATE_FIELDS: usize = 7;

/// MAC, IPv4, IPv6.
pub const NETWORK_FIELDS: usize = 3;

/// Name, capacity, usage, state.
pub const POOL_FIELDS: usize = 4;

// =============================================================================
// Fields
// =============================================================================

/// Comma-separated payload of a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fields<'a> {
    payload: &'a str,
}

impl<'a> Fields<'a> {
    pub const fn new(payload: &'a str) -> Self { Self { payload } }

    /// Trimmed fields in order. An empty payload has no fields at all, while
    /// `"a,"` has two (the second empty).
    pub fn iter(&self) -> FieldIter<'a> {
        FieldIter {
            inner: if self.payload.is_empty() { None } else { Some(self.payload.split(SEPARATOR)) },
        }
    }
}

/// Iterator over the trimmed fields of a payload.
pub struct FieldIter<'a> {
    inner: Option<Split<'a, char>>,
}

impl<'a> Iterator for FieldIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> { self.inner.as_mut()?.next().map(str::trim) }
}

// =============================================================================
// Command
// =============================================================================

/// A classified protocol line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Update(Fields<'a>),
    Network(Fields<'a>),
    PoolReset,
    PoolAdd(Fields<'a>),
    /// Anything without a known prefix, including blank lines.
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    /// Classify a line. Surrounding whitespace (including a trailing `\r`) is
    /// ignored; prefixes are case-sensitive.
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if let Some(payload) = line.strip_prefix(UPDATE_PREFIX) {
            Self::Update(Fields::new(payload))
        } else if let Some(payload) = line.strip_prefix(NETWORK_PREFIX) {
            Self::Network(Fields::new(payload))
        } else if let Some(payload) = line.strip_prefix(POOL_PREFIX) {
            if payload.trim() == POOL_RESET {
                Self::PoolReset
            } else {
                Self::PoolAdd(Fields::new(payload))
            }
        } else {
            Self::Unknown(line)
        }
    }

    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::Update(_) => CommandKind::Update,
            Self::Network(_) => CommandKind::Network,
            Self::PoolReset => CommandKind::PoolReset,
            Self::PoolAdd(_) => CommandKind::PoolAdd,
            Self::Unknown(_) => CommandKind::Unknown,
        }
    }
}

/// Command type without its payload, for reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandKind {
    Update,
    Network,
    PoolReset,
    PoolAdd,
    Unknown,
}

impl CommandKind {
    /// Short name for log lines.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Update => "UPDATE",
            Self::Network => "NETWORK",
            Self::PoolReset => "POOL:RESET",
            Self::PoolAdd => "POOL",
            Self::Unknown => "unknown",
        }
    }
}

/// Outcome of [`apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Applied {
    pub kind: CommandKind,
    /// Some stored field differs from before the command.
    pub changed: bool,
    /// A `POOL:` record was discarded because the list was full.
    pub pool_dropped: bool,
}

impl Applied {
    const fn new(
        kind: CommandKind,
        changed: bool,
    ) -> Self {
        Self {
            kind,
            changed,
            pool_dropped: false,
        }
    }

    /// Check if the line was not a recognised command.
    #[inline]
    pub const fn is_unknown(&self) -> bool { matches!(self.kind, CommandKind::Unknown) }
}

// =============================================================================
// Apply
// =============================================================================

/// Parse a temperature field. Anything that is not a finite number reads as 0.0.
pub fn parse_temperature(field: &str) -> f32 {
    match field.parse::<f32>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Fold `command` into `snapshot`.
///
/// Only `UPDATE` refreshes `last_update_ms` (to `now_ms`) and optimistically
/// clears `has_error`; the watchdog re-evaluates staleness on the same tick.
pub fn apply(
    command: &Command<'_>,
    snapshot: &mut TelemetrySnapshot,
    now_ms: u64,
) -> Applied {
    let kind = command.kind();
    match command {
        Command::Update(fields) => Applied::new(kind, apply_update(fields, snapshot, now_ms)),
        Command::Network(fields) => Applied::new(kind, apply_network(fields, snapshot)),
        Command::PoolReset => Applied::new(kind, snapshot.reset_pools()),
        Command::PoolAdd(fields) => {
            if snapshot.pools_full() {
                Applied {
                    pool_dropped: true,
                    ..Applied::new(kind, false)
                }
            } else {
                let mut parts = fields.iter().take(POOL_FIELDS);
                let mut next = || parts.next().unwrap_or("");
                let pool = PoolRecord::new(next(), next(), next(), next());
                Applied::new(kind, snapshot.push_pool(pool))
            }
        }
        Command::Unknown(_) => Applied::new(kind, false),
    }
}

/// Parse and apply a raw line in one step.
pub fn decode_line(
    line: &str,
    snapshot: &mut TelemetrySnapshot,
    now_ms: u64,
) -> Applied {
    apply(&Command::parse(line), snapshot, now_ms)
}

fn apply_update(
    fields: &Fields<'_>,
    snapshot: &mut TelemetrySnapshot,
    now_ms: u64,
) -> bool {
    let mut changed = false;
    for (index, field) in fields.iter().take(UPDATE_FIELDS).enumerate() {
        changed |= match index {
            6 => snapshot.storage_health.set(field),
            i => snapshot.set_temperature(i, parse_temperature(field)),
        };
    }
    changed |= snapshot.has_error;
    snapshot.has_error = false;
    snapshot.last_update_ms = now_ms;
    changed
}

fn apply_network(
    fields: &Fields<'_>,
    snapshot: &mut TelemetrySnapshot,
) -> bool {
    let mut changed = false;
    for (index, field) in fields.iter().take(NETWORK_FIELDS).enumerate() {
        changed |= match index {
            0 => assign(&mut snapshot.mac_address, field),
            1 => assign(&mut snapshot.ipv4_address, field),
            _ => assign(&mut snapshot.ipv6_address, field),
        };
    }
    changed
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::config::MAX_POOLS;

    const FULL_UPDATE: &str = "UPDATE:45.2,38.1,42.5,39.8,41.2,43.6,Healthy";

    #[test]
    fn test_parse_classifies_prefixes() {
        assert_eq!(Command::parse(FULL_UPDATE).kind(), CommandKind::Update);
        assert_eq!(Command::parse("NETWORK:a,b,c").kind(), CommandKind::Network);
        assert_eq!(Command::parse("POOL:RESET").kind(), CommandKind::PoolReset);
        assert_eq!(Command::parse("POOL:tank,1T,5%,Healthy").kind(), CommandKind::PoolAdd);
        assert_eq!(Command::parse("update:1,2").kind(), CommandKind::Unknown, "case-sensitive");
        assert_eq!(Command::parse("").kind(), CommandKind::Unknown);
        assert_eq!(Command::parse("HELLO"), Command::Unknown("HELLO"));
    }

    #[test]
    fn test_parse_trims_carriage_return() {
        assert_eq!(Command::parse("POOL:RESET\r"), Command::PoolReset);
        assert_eq!(Command::parse("  UPDATE:1\r\n").kind(), CommandKind::Update);
    }

    #[test]
    fn test_fields_split_and_trim() {
        let fields = Fields::new(" a , b,,c ");
        let collected: heapless::Vec<&str, 8> = fields.iter().collect();
        assert_eq!(collected.as_slice(), &["a", "b", "", "c"]);
        assert_eq!(Fields::new("").iter().count(), 0);
        assert_eq!(Fields::new("x,").iter().count(), 2);
    }

    #[test]
    fn test_full_update_sets_every_field() {
        let mut snap = TelemetrySnapshot::new(0);
        snap.has_error = true;

        let applied = decode_line(FULL_UPDATE, &mut snap, 5_000);

        assert_eq!(applied.kind, CommandKind::Update);
        assert!(applied.changed);
        assert_eq!(snap.temperatures(), [45.2, 38.1, 42.5, 39.8, 41.2, 43.6]);
        assert_eq!(snap.storage_health.as_str(), "Healthy");
        assert_eq!(snap.last_update_ms, 5_000);
        assert!(!snap.has_error);
    }

    #[test]
    fn test_identical_update_reports_no_change() {
        let mut snap = TelemetrySnapshot::new(0);
        assert!(decode_line(FULL_UPDATE, &mut snap, 100).changed);

        let second = decode_line(FULL_UPDATE, &mut snap, 200);
        assert!(!second.changed);
        assert_eq!(snap.last_update_ms, 200, "timestamp refreshes regardless");
    }

    #[test]
    fn test_short_update_keeps_tail() {
        let mut snap = TelemetrySnapshot::new(0);
        decode_line(FULL_UPDATE, &mut snap, 0);

        decode_line("UPDATE:50.0,30.0", &mut snap, 10);
        assert_eq!(snap.temperatures(), [50.0, 30.0, 42.5, 39.8, 41.2, 43.6]);
        assert_eq!(snap.storage_health.as_str(), "Healthy");
    }

    #[test]
    fn test_update_extra_fields_ignored() {
        let mut snap = TelemetrySnapshot::new(0);
        decode_line("UPDATE:1,2,3,4,5,6,Degraded,extra,99", &mut snap, 0);
        assert_eq!(snap.temperatures(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(snap.storage_health.as_str(), "Degraded");
    }

    #[test]
    fn test_bad_temperature_reads_zero() {
        let mut snap = TelemetrySnapshot::new(0);
        decode_line("UPDATE:abc,NaN,inf,,-3.5", &mut snap, 0);
        assert_eq!(snap.temperatures(), [0.0, 0.0, 0.0, 0.0, -3.5, 0.0]);
    }

    #[test]
    fn test_empty_update_still_refreshes() {
        let mut snap = TelemetrySnapshot::new(0);
        snap.has_error = true;
        let applied = decode_line("UPDATE:", &mut snap, 70_000);
        assert!(applied.changed, "clearing the error flag is a change");
        assert_eq!(snap.last_update_ms, 70_000);
        assert_eq!(snap.temperatures(), [0.0; 6]);
    }

    #[test]
    fn test_network_trailing_comma_stores_empty() {
        let mut snap = TelemetrySnapshot::new(0);
        decode_line("NETWORK:aa:bb:cc:dd:ee:ff,192.168.1.10,fe80::1", &mut snap, 0);
        decode_line("NETWORK:aa:bb:cc:dd:ee:ff,10.0.0.2,", &mut snap, 0);

        assert_eq!(snap.mac_address.as_str(), "aa:bb:cc:dd:ee:ff");
        assert_eq!(snap.ipv4_address.as_str(), "10.0.0.2");
        assert_eq!(snap.ipv6_address.as_str(), "");
        assert_eq!(snap.last_update_ms, 0, "NETWORK never feeds the watchdog");
    }

    #[test]
    fn test_network_short_line_keeps_rest() {
        let mut snap = TelemetrySnapshot::new(0);
        decode_line("NETWORK:m,4,6", &mut snap, 0);
        assert!(decode_line("NETWORK:m2", &mut snap, 0).changed);
        assert_eq!(snap.mac_address.as_str(), "m2");
        assert_eq!(snap.ipv4_address.as_str(), "4");
        assert_eq!(snap.ipv6_address.as_str(), "6");
    }

    #[test]
    fn test_pool_reset_then_four_pools_in_order() {
        let mut snap = TelemetrySnapshot::new(0);
        decode_line("POOL:old,1T,1%,Healthy", &mut snap, 0);
        assert!(decode_line("POOL:RESET", &mut snap, 0).changed);

        for line in [
            "POOL:tank,7.3T,42%,Healthy",
            "POOL:backup,3.6T,80%,Degraded",
            "POOL:media,10T,12%,Healthy",
            "POOL:scratch,500G,3%,Healthy",
        ] {
            assert!(decode_line(line, &mut snap, 0).changed);
        }

        let fifth = decode_line("POOL:extra,1T,1%,Healthy", &mut snap, 0);
        assert!(!fifth.changed);
        assert!(fifth.pool_dropped);

        let names: heapless::Vec<&str, MAX_POOLS> = snap.pools.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.as_slice(), &["tank", "backup", "media", "scratch"]);
        assert_eq!(snap.pools[1].state.as_str(), "Degraded");
        assert_eq!(snap.pools[0].capacity.as_str(), "7.3T");
        assert_eq!(snap.pools[0].usage.as_str(), "42%");
    }

    #[test]
    fn test_short_pool_fills_blanks() {
        let mut snap = TelemetrySnapshot::new(0);
        decode_line("POOL:tank,2T", &mut snap, 0);
        let pool = &snap.pools[0];
        assert_eq!(pool.name.as_str(), "tank");
        assert_eq!(pool.capacity.as_str(), "2T");
        assert_eq!(pool.usage.as_str(), "");
        assert!(!pool.state.is_healthy(), "missing state is not healthy");
    }

    #[test]
    fn test_unknown_changes_nothing() {
        let mut snap = TelemetrySnapshot::new(0);
        decode_line(FULL_UPDATE, &mut snap, 10);
        let before = snap.clone();

        let applied = decode_line("HELLO:world", &mut snap, 99);
        assert_eq!(applied.kind, CommandKind::Unknown);
        assert!(!applied.changed);
        assert_eq!(snap, before);
    }

    proptest! {
        #[test]
        fn test_unknown_lines_never_change_state(line in "[a-z0-9 ,:]{0,64}") {
            let mut snap = TelemetrySnapshot::new(0);
            let before = snap.clone();
            let applied = decode_line(&line, &mut snap, 1);
            prop_assert_eq!(applied.kind, CommandKind::Unknown);
            prop_assert!(!applied.changed);
            prop_assert_eq!(snap, before);
        }

        #[test]
        fn test_arbitrary_lines_never_panic(line in "\\PC{0,160}") {
            let mut snap = TelemetrySnapshot::new(0);
            let _ = decode_line(&line, &mut snap, 1);
            prop_assert!(snap.pools.len() <= MAX_POOLS);
        }

        #[test]
        fn test_pool_list_never_exceeds_capacity(
            lines in proptest::collection::vec(
                prop_oneof![
                    Just("POOL:RESET".to_string()),
                    "[a-z]{1,8},[0-9]{1,3}T,[0-9]{1,2}%,(Healthy|Degraded)".prop_map(|p| format!("POOL:{p}")),
                ],
                0..32,
            )
        ) {
            let mut snap = TelemetrySnapshot::new(0);
            for line in &lines {
                decode_line(line, &mut snap, 0);
                prop_assert!(snap.pools.len() <= MAX_POOLS);
            }
        }
    }
}
