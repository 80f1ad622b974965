use tracing::debug;

use crate::error::Result;

/// Thread settings for the matrix builders.
///
/// With `num_threads: None` work runs on rayon's global pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComputeConfig {
    pub num_threads: Option<usize>,
}

impl ComputeConfig {
    pub fn with_threads(num_threads: usize) -> Self {
        Self {
            num_threads: Some(num_threads),
        }
    }

    /// Run `op` under this configuration, building a dedicated pool when a
    /// thread count is set.
    pub fn install<OP, R>(&self, op: OP) -> Result<R>
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match self.num_threads {
            None => {
                debug!(
                    threads = rayon::current_num_threads(),
                    "Using global thread pool"
                );
                Ok(op())
            }
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?;
                debug!(threads = pool.current_num_threads(), "Built dedicated thread pool");
                Ok(pool.install(op))
            }
        }
    }
}
