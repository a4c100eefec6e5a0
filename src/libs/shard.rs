//! Work distribution.
//!
//! A run is split into `world_size` shards. A shard owns every
//! `world_size`-th k-mer bucket during extraction and one contiguous block
//! of rows during scoring. Shards run either as threads of one process, via
//! [`scatter_gather`], or as separate processes whose outputs are merged
//! afterwards.

use crate::libs::error::{Result, SprintError};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shard {
    rank: usize,
    world_size: usize,
}

impl Default for Shard {
    fn default() -> Self {
        Shard::single()
    }
}

impl Shard {
    /// The only shard of an undistributed run
    pub fn single() -> Self {
        Shard {
            rank: 0,
            world_size: 1,
        }
    }

    pub fn new(rank: usize, world_size: usize) -> Result<Self> {
        if world_size == 0 {
            return Err(SprintError::InvalidConfig(
                "world size must be positive".to_string(),
            ));
        }
        if rank >= world_size {
            return Err(SprintError::InvalidConfig(format!(
                "rank {} is out of a world of {}",
                rank, world_size
            )));
        }
        Ok(Shard { rank, world_size })
    }

    /// Every shard of a world, by rank
    pub fn all(world_size: usize) -> Result<Vec<Self>> {
        (0..world_size.max(1))
            .map(|rank| Shard::new(rank, world_size.max(1)))
            .collect()
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn world_size(&self) -> usize {
        self.world_size
    }

    /// Round-robin ownership of work units
    pub fn owns(&self, unit: usize) -> bool {
        unit % self.world_size == self.rank
    }

    /// The contiguous block of `0..n` owned by this shard
    pub fn block(&self, n: usize) -> Range<usize> {
        let chunk = n.div_ceil(self.world_size);
        let start = (self.rank * chunk).min(n);
        let end = (start + chunk).min(n);
        start..end
    }
}

/// Run `task` once per shard on scoped threads and fold the results.
///
/// Results arrive over a channel in completion order, so `merge` has to be
/// commutative. The first failing task aborts the gather.
pub fn scatter_gather<T, F, M>(world_size: usize, task: F, init: T, mut merge: M) -> Result<T>
where
    T: Send,
    F: Fn(Shard) -> Result<T> + Sync,
    M: FnMut(T, T) -> T,
{
    let shards = Shard::all(world_size)?;
    let (snd, rcv) = crossbeam::channel::bounded::<Result<T>>(shards.len());
    let task = &task;

    crossbeam::scope(|s| {
        //----------------------------
        // Workers
        //----------------------------
        for shard in shards {
            let sendr = snd.clone();
            s.spawn(move |_| {
                log::debug!("Shard {}/{} started", shard.rank(), shard.world_size());
                // The channel holds one slot per shard, so this never blocks
                sendr.send(task(shard)).ok();
            });
        }
        // Close the channel, otherwise the gather never ends
        drop(snd);

        //----------------------------
        // Gather
        //----------------------------
        let mut acc = init;
        for part in rcv.iter() {
            acc = merge(acc, part?);
        }
        Ok(acc)
    })
    .map_err(|_| SprintError::Worker("a shard panicked".to_string()))?
}
