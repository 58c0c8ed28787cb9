//! Shard display-grid derivation.
//!
//! `total = primaries * (1 + replicas)`. The grid caps primaries at
//! [`PRIMARY_DISPLAY_CAP`] individually-shown cells and appends an overflow
//! marker beyond that; each replica generation mirrors the same capped row.

/// How many primary shards are shown as individual cells.
pub const PRIMARY_DISPLAY_CAP: u32 = 5;

/// One cell of the shard grid. Replica cells carry their generation and
/// render as `shard.replica`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardCell {
    pub shard: u32,
    pub replica: Option<u32>,
}

impl ShardCell {
    pub fn label(&self) -> String {
        match self.replica {
            Some(generation) => format!("{}.{}", self.shard, generation),
            None => self.shard.to_string(),
        }
    }
}

/// Pure function of the two shard settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardLayout {
    shards: u32,
    replicas: u32,
}

impl ShardLayout {
    pub fn new(number_of_shards: u32, number_of_replicas: u32) -> Self {
        ShardLayout {
            shards: number_of_shards,
            replicas: number_of_replicas,
        }
    }

    pub fn shard_count(&self) -> u32 {
        self.shards
    }

    pub fn replica_count(&self) -> u32 {
        self.replicas
    }

    /// Total shard count including replicas.
    pub fn total(&self) -> u64 {
        u64::from(self.shards) * (1 + u64::from(self.replicas))
    }

    /// Whether the grid needs an overflow marker cell per row.
    pub fn overflows(&self) -> bool {
        self.shards > PRIMARY_DISPLAY_CAP
    }

    /// Number of cells per row, overflow marker included.
    pub fn columns(&self) -> u32 {
        self.shards.min(PRIMARY_DISPLAY_CAP) + u32::from(self.overflows())
    }

    /// The primary row: up to the display cap, one cell per shard.
    pub fn primary_row(&self) -> Vec<ShardCell> {
        (1..=self.shards.min(PRIMARY_DISPLAY_CAP))
            .map(|shard| ShardCell { shard, replica: None })
            .collect()
    }

    /// One row per replica generation, mirroring the capped primary row.
    pub fn replica_rows(&self) -> Vec<Vec<ShardCell>> {
        (1..=self.replicas)
            .map(|generation| {
                (1..=self.shards.min(PRIMARY_DISPLAY_CAP))
                    .map(|shard| ShardCell {
                        shard,
                        replica: Some(generation),
                    })
                    .collect()
            })
            .collect()
    }
}
