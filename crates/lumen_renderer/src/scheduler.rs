//! Row scheduling across a fixed pool of worker threads.
//!
//! One long-lived worker runs on each thread of a dedicated rayon pool.
//! Workers claim rows from a shared [`LineQueue`] until it is drained,
//! keeping finished rows in a private batch. Each worker then takes the
//! output lock once and flushes its whole batch, post-processing as it
//! writes. The scope joins every worker before `run` returns.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::{Color, ImageBuffer, LineQueue, PostProcess, Progress, RenderResult};

/// Finished rows a worker holds until the queue is drained.
type RowBatch = Vec<(u32, Vec<Color>)>;

/// Thread-local state of one worker.
struct Worker {
    index: usize,
    rng: StdRng,
    finished: RowBatch,
}

impl Worker {
    fn new(index: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
            None => StdRng::from_entropy(),
        };
        Self {
            index,
            rng,
            finished: Vec::new(),
        }
    }

    fn run<F>(
        mut self,
        queue: &LineQueue,
        render_line: &F,
        progress: &Progress,
        image: &Mutex<ImageBuffer>,
        post: &PostProcess,
    ) where
        F: Fn(u32, &mut dyn RngCore) -> Vec<Color> + Sync,
    {
        while let Some(row) = queue.claim() {
            let line = render_line(row, &mut self.rng);
            self.finished.push((row, line));
            progress.report();
        }
        self.flush(image, post);
    }

    /// Write every finished row under a single lock acquisition.
    fn flush(self, image: &Mutex<ImageBuffer>, post: &PostProcess) {
        // A poisoned lock only means another worker panicked mid-flush;
        // the rows it wrote are still valid.
        let mut image = image.lock().unwrap_or_else(PoisonError::into_inner);
        for (row, line) in &self.finished {
            image.set_row(*row, line.iter().map(|c| post.apply(*c)));
        }
        log::debug!("Worker {} flushed {} rows", self.index, self.finished.len());
    }
}

/// Distributes rows over a fixed number of worker threads.
#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    threads: usize,
    seed: Option<u64>,
}

impl Scheduler {
    /// A scheduler running `threads` workers (at least one).
    pub fn new(threads: usize) -> Self {
        Self {
            threads: threads.max(1),
            seed: None,
        }
    }

    /// One worker per logical processor.
    pub fn per_cpu() -> Self {
        Self::new(num_cpus::get())
    }

    /// Seed worker `i` with `seed + i` instead of fresh entropy.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Render every row in `queue` with `render_line` and flush into `image`.
    ///
    /// Blocks until all workers have flushed.
    pub fn run<F>(
        &self,
        queue: &LineQueue,
        render_line: F,
        progress: &Progress,
        image: &Mutex<ImageBuffer>,
        post: &PostProcess,
    ) -> RenderResult<()>
    where
        F: Fn(u32, &mut dyn RngCore) -> Vec<Color> + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .thread_name(|i| format!("lumen-worker-{}", i))
            .build()?;

        let render_line = &render_line;
        pool.scope(|scope| {
            for index in 0..self.threads {
                let worker = Worker::new(index, self.seed);
                scope.spawn(move |_| worker.run(queue, render_line, progress, image, post));
            }
        });

        Ok(())
    }
}
