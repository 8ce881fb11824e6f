//! Simulator configuration.
//!
//! Configuration is split into the TLB geometry and latencies ([`TlbConfig`])
//! and the parameters of the reference collaborators ([`MemoryConfig`]). Every
//! field has a default, so a JSON file only needs to name the values it
//! overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::PageGeometry;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{level} TLB must have at least one entry")]
    EmptyTlb { level: &'static str },
    #[error("virtual address width {va_bits} exceeds 64 bits")]
    AddressTooWide { va_bits: u32 },
    #[error("page offset width {page_bits} must be below the virtual address width {va_bits}")]
    PageTooLarge { page_bits: u32, va_bits: u32 },
    #[error("demand paging needs at least one physical frame")]
    NoFrames,
}

/// Root configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tlb: TlbConfig,
    pub memory: MemoryConfig,
}

/// TLB geometry and lookup latencies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TlbConfig {
    /// Number of L1 slots.
    pub l1_entries: usize,
    /// Number of L2 slots.
    pub l2_entries: usize,
    /// Width of the page offset; pages are `2^page_bits` bytes.
    pub page_bits: u32,
    /// Width of the virtual address space.
    pub va_bits: u32,
    /// Charged on every L1 lookup.
    pub l1_latency_ns: u64,
    /// Charged on every L2 lookup (after an L1 miss).
    pub l2_latency_ns: u64,
}

impl Default for TlbConfig {
    fn default() -> Self {
        Self {
            l1_entries: 16,
            l2_entries: 64,
            page_bits: 12,
            va_bits: 48,
            l1_latency_ns: 1,
            l2_latency_ns: 4,
        }
    }
}

impl TlbConfig {
    pub fn geometry(&self) -> PageGeometry {
        PageGeometry::new(self.page_bits, self.va_bits)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.l1_entries == 0 {
            return Err(ConfigError::EmptyTlb { level: "L1" });
        }
        if self.l2_entries == 0 {
            return Err(ConfigError::EmptyTlb { level: "L2" });
        }
        if self.va_bits > 64 {
            return Err(ConfigError::AddressTooWide {
                va_bits: self.va_bits,
            });
        }
        if self.page_bits >= self.va_bits {
            return Err(ConfigError::PageTooLarge {
                page_bits: self.page_bits,
                va_bits: self.va_bits,
            });
        }
        Ok(())
    }
}

/// Parameters of the reference page table and DRAM sink.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Charged on every page-table resolve.
    pub page_walk_latency_ns: u64,
    /// Extra cost when demand paging allocates a frame.
    pub page_fault_latency_ns: u64,
    /// Charged for every page flushed to DRAM.
    pub dram_write_latency_ns: u64,
    /// Physical frames available to demand paging.
    pub frame_count: u64,
    /// Map unknown pages on first touch instead of failing.
    pub demand_paging: bool,
    /// Keep the list of flushed page bases, not just their count.
    pub record_writebacks: bool,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            page_walk_latency_ns: 100,
            page_fault_latency_ns: 10_000,
            dram_write_latency_ns: 100,
            frame_count: 1 << 16,
            demand_paging: true,
            record_writebacks: false,
        }
    }
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tlb.validate()?;
        if self.memory.demand_paging && self.memory.frame_count == 0 {
            return Err(ConfigError::NoFrames);
        }
        Ok(())
    }
}
