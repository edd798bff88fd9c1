//! Telemetry state store.
//!
//! [`TelemetrySnapshot`] is the single record of everything the device knows
//! about the NAS: temperatures, storage health, network identity and the
//! storage pool list. It is created once at boot with sentinel values and
//! mutated in place by the protocol decoder and the staleness watchdog.
//!
//! All text fields are fixed-capacity `heapless` strings. Input longer than a
//! field's capacity is cut on a char boundary; nothing else is validated.

use heapless::{String, Vec};

use crate::config::{DRIVE_COUNT, MAX_POOLS, TEMP_COUNT};

// =============================================================================
// Field Capacities
// =============================================================================

/// Capacity of status labels (storage health, pool state).
pub const LABEL_LEN: usize = 16;

/// Capacity of the MAC address field.
pub const MAC_LEN: usize = 24;

/// Capacity of the IPv4 address field.
pub const IPV4_LEN: usize = 16;

/// Capacity of the IPv6 address field (full uncompressed form is 39 chars).
pub const IPV6_LEN: usize = 48;

/// Capacity of a pool name.
pub const POOL_NAME_LEN: usize = 24;

/// Capacity of the pool capacity / usage display texts.
pub const POOL_TEXT_LEN: usize = 16;

/// The one label value that counts as healthy.
pub const HEALTHY: &str = "Healthy";

// =============================================================================
// Helpers
// =============================================================================

/// The single health classification used everywhere: only the exact label
/// `"Healthy"` is healthy. `Degraded`, `Failed`, `Problem`, `ONLINE`, ... are not.
#[inline]
pub fn is_healthy(label: &str) -> bool { label == HEALTHY }

/// Copy `src` into a fixed-capacity string, dropping whatever does not fit.
pub fn truncated<const N: usize>(src: &str) -> String<N> {
    let mut out: String<N> = String::new();
    for c in src.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Overwrite `dst` with (truncated) `src`. Returns `true` if the stored text changed.
pub fn assign<const N: usize>(
    dst: &mut String<N>,
    src: &str,
) -> bool {
    let next = truncated::<N>(src);
    if *dst == next {
        false
    } else {
        *dst = next;
        true
    }
}

// =============================================================================
// Health Label
// =============================================================================

/// Open status label such as `Healthy`, `Problem` or `Degraded`.
///
/// Kept as text so new collector states display as-is; the only question the
/// firmware asks of it is [`HealthLabel::is_healthy`].
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct HealthLabel(String<LABEL_LEN>);

impl HealthLabel {
    /// Label from arbitrary text (truncated to `LABEL_LEN`).
    pub fn new(text: &str) -> Self { Self(truncated(text)) }

    /// The `"Healthy"` label.
    pub fn healthy() -> Self { Self::new(HEALTHY) }

    /// Replace the label text. Returns `true` if it changed.
    pub fn set(
        &mut self,
        text: &str,
    ) -> bool {
        assign(&mut self.0, text)
    }

    /// Label text as received.
    #[inline]
    pub fn as_str(&self) -> &str { self.0.as_str() }

    /// Check if this label reads exactly `"Healthy"`.
    #[inline]
    pub fn is_healthy(&self) -> bool { is_healthy(self.as_str()) }
}

// =============================================================================
// Pool Record
// =============================================================================

/// One storage pool / array as reported by `POOL:`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PoolRecord {
    pub name: String<POOL_NAME_LEN>,
    /// Display text, e.g. `"7.3T"`.
    pub capacity: String<POOL_TEXT_LEN>,
    /// Display text, e.g. `"42%"`.
    pub usage: String<POOL_TEXT_LEN>,
    pub state: HealthLabel,
}

impl PoolRecord {
    pub fn new(
        name: &str,
        capacity: &str,
        usage: &str,
        state: &str,
    ) -> Self {
        Self {
            name: truncated(name),
            capacity: truncated(capacity),
            usage: truncated(usage),
            state: HealthLabel::new(state),
        }
    }
}

// =============================================================================
// Telemetry Snapshot
// =============================================================================

/// Everything the device currently knows about the NAS.
#[derive(Clone, Debug, PartialEq)]
pub struct TelemetrySnapshot {
    /// System (board/CPU) temperature in °C. 0.0 until the first update.
    pub system_temp: f32,
    /// Drive temperatures in °C, drive 1 first. 0.0 until the first update.
    pub drive_temps: [f32; DRIVE_COUNT],
    pub storage_health: HealthLabel,
    pub mac_address: String<MAC_LEN>,
    pub ipv4_address: String<IPV4_LEN>,
    pub ipv6_address: String<IPV6_LEN>,
    /// Pools in arrival order (= display order), at most `MAX_POOLS`.
    pub pools: Vec<PoolRecord, MAX_POOLS>,
    /// Monotonic time of the last accepted `UPDATE`. Only `UPDATE` refreshes it.
    pub last_update_ms: u64,
    /// Stale-data flag, recomputed by the watchdog every tick.
    pub has_error: bool,
}

impl TelemetrySnapshot {
    /// Fresh snapshot at boot. The staleness clock starts at `boot_ms`.
    pub fn new(boot_ms: u64) -> Self {
        Self {
            system_temp: 0.0,
            drive_temps: [0.0; DRIVE_COUNT],
            storage_health: HealthLabel::healthy(),
            mac_address: String::new(),
            ipv4_address: String::new(),
            ipv6_address: String::new(),
            pools: Vec::new(),
            last_update_ms: boot_ms,
            has_error: false,
        }
    }

    /// All six readings: system first, then drives 1-5.
    pub fn temperatures(&self) -> [f32; TEMP_COUNT] {
        let mut temps = [0.0; TEMP_COUNT];
        temps[0] = self.system_temp;
        temps[1..].copy_from_slice(&self.drive_temps);
        temps
    }

    /// Set reading `index` (0 = system, 1..=5 = drives). Returns `true` if it changed.
    /// Out-of-range indices are ignored.
    pub fn set_temperature(
        &mut self,
        index: usize,
        value: f32,
    ) -> bool {
        let slot = match index {
            0 => &mut self.system_temp,
            i if i <= DRIVE_COUNT => &mut self.drive_temps[i - 1],
            _ => return false,
        };
        if *slot == value {
            false
        } else {
            *slot = value;
            true
        }
    }

    /// Append a pool. Returns `false` (and stores nothing) once `MAX_POOLS` are held.
    pub fn push_pool(
        &mut self,
        pool: PoolRecord,
    ) -> bool {
        self.pools.push(pool).is_ok()
    }

    /// Drop all pools. Returns `true` if any were held.
    pub fn reset_pools(&mut self) -> bool {
        let had_pools = !self.pools.is_empty();
        self.pools.clear();
        had_pools
    }

    /// Check if the pool list has reached `MAX_POOLS`.
    #[inline]
    pub fn pools_full(&self) -> bool { self.pools.is_full() }
}

// =============================================================================
// Unit Tests
// =============================================================================
