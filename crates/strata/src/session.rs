//! Layout session: the current snapshot plus background recomputation.
//!
//! Readers take an `Arc<Layout>` and keep it as long as they like; a finished run swaps the
//! pointer in one step. Every request takes a generation number and a run only publishes while
//! it is still the newest request, so a stale run can never overwrite a newer layout.

use crate::error::Result;
use crate::model::TreeGraph;
use crate::options::LayoutOptions;
use crate::output::Layout;
use crate::pipeline;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::thread::JoinHandle;

#[derive(Debug, Default)]
pub struct LayoutSession {
    current: RwLock<Arc<Layout>>,
    requested: AtomicU64,
    published: AtomicU64,
}

impl LayoutSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently published layout (empty before the first run).
    pub fn snapshot(&self) -> Arc<Layout> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Generation of the published snapshot, `0` before the first run.
    pub fn generation(&self) -> u64 {
        self.published.load(Ordering::Acquire)
    }

    fn next_generation(&self) -> u64 {
        self.requested.fetch_add(1, Ordering::AcqRel) + 1
    }

    fn publish(&self, generation: u64, layout: Layout) -> Option<Arc<Layout>> {
        let layout = Arc::new(layout);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if self.requested.load(Ordering::Acquire) != generation {
            tracing::debug!(generation, "discarding superseded layout");
            return None;
        }
        *guard = Arc::clone(&layout);
        self.published.store(generation, Ordering::Release);
        tracing::debug!(generation, "published layout");
        Some(layout)
    }

    fn run(
        &self,
        generation: u64,
        input: &TreeGraph,
        options: &LayoutOptions,
    ) -> Result<Option<Arc<Layout>>> {
        let layout = pipeline::run(input, options)?;
        Ok(self.publish(generation, layout))
    }

    /// Lays out `input` on the calling thread. `Ok(None)` means a newer request arrived first
    /// and the result was dropped.
    pub fn reset(
        &self,
        input: &TreeGraph,
        options: &LayoutOptions,
    ) -> Result<Option<Arc<Layout>>> {
        let generation = self.next_generation();
        self.run(generation, input, options)
    }

    /// Lays out `input` on a background thread. Readers keep seeing the previous snapshot until
    /// the run publishes.
    pub fn spawn(self: &Arc<Self>, input: TreeGraph, options: LayoutOptions) -> PendingLayout {
        let generation = self.next_generation();
        let done = Arc::new(AtomicBool::new(false));

        let session = Arc::clone(self);
        let flag = Arc::clone(&done);
        let handle = std::thread::spawn(move || {
            let _done = DoneOnDrop(flag);
            session.run(generation, &input, &options)
        });

        PendingLayout {
            generation,
            done,
            handle,
        }
    }
}

/// Sets the completion flag even if the run panics.
struct DoneOnDrop(Arc<AtomicBool>);

impl Drop for DoneOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

#[derive(Debug)]
pub struct PendingLayout {
    generation: u64,
    done: Arc<AtomicBool>,
    handle: JoinHandle<Result<Option<Arc<Layout>>>>,
}

impl PendingLayout {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }

    /// Blocks until the run finishes. Panics from the run are resumed on this thread.
    pub fn wait(self) -> Result<Option<Arc<Layout>>> {
        match self.handle.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}
