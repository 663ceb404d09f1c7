//=========================================================================
// Loading Screen
//=========================================================================
//
// Default display shown while assets stream in.
//
// Architecture:
//   asset loader threads ──AssetLoadListener──→ Arc<LoadingProgress>
//                                                 ├─ atomic counters
//                                                 └─ Mutex<String> last path
//   DefaultLoadingScreenDisplay::update() ──snapshot()──┘
//
// Counter contract:
// - registered counters only grow
// - a loaded counter is bumped only while it is below its registered
//   counter, so loaded <= registered always holds
// - `snapshot()` reads loaded before registered, so every snapshot also
//   satisfies loaded <= registered
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::{Display, DisplayContext};
use crate::core::tag::CompoundTag;

//=== AssetLoadListener ===================================================

/// Callbacks an asset loader reports progress through. Called from any
/// thread.
pub trait AssetLoadListener: Send + Sync {
    fn model_registered(&self, id: &str, path: &str);
    fn texture_registered(&self, id: &str, path: &str);
    fn model_loaded(&self, id: &str, path: &str);
    fn texture_loaded(&self, id: &str, path: &str);
}

//=== LoadingProgress =====================================================

/// Thread-safe asset counters shared between loaders and the screen.
#[derive(Debug, Default)]
pub struct LoadingProgress {
    models_registered: AtomicUsize,
    models_loaded: AtomicUsize,
    textures_registered: AtomicUsize,
    textures_loaded: AtomicUsize,
    last_loaded: Mutex<String>,
}

/// Consistent read of the counters at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressSnapshot {
    pub models_loaded: usize,
    pub models_registered: usize,
    pub textures_loaded: usize,
    pub textures_registered: usize,
}

impl ProgressSnapshot {
    pub fn loaded(&self) -> usize {
        self.models_loaded + self.textures_loaded
    }

    pub fn registered(&self) -> usize {
        self.models_registered + self.textures_registered
    }

    /// Loaded share in `[0, 1]`; `1.0` when nothing is registered.
    pub fn fraction(&self) -> f32 {
        match self.registered() {
            0 => 1.0,
            total => self.loaded() as f32 / total as f32,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.loaded() == self.registered()
    }
}

impl LoadingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        let models_loaded = self.models_loaded.load(Ordering::Acquire);
        let textures_loaded = self.textures_loaded.load(Ordering::Acquire);
        ProgressSnapshot {
            models_loaded,
            models_registered: self.models_registered.load(Ordering::Acquire),
            textures_loaded,
            textures_registered: self.textures_registered.load(Ordering::Acquire),
        }
    }

    pub fn fraction(&self) -> f32 {
        self.snapshot().fraction()
    }

    /// Path of the most recently loaded asset, empty before the first.
    pub fn last_loaded(&self) -> String {
        self.lock_last_loaded().clone()
    }

    fn lock_last_loaded(&self) -> MutexGuard<'_, String> {
        self.last_loaded.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_loaded(&self, kind: &str, loaded: &AtomicUsize, registered: &AtomicUsize, id: &str, path: &str) {
        let bumped = loaded.fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
            (current < registered.load(Ordering::Acquire)).then_some(current + 1)
        });

        if bumped.is_err() {
            warn!(target: "display", "{} '{}' reported loaded without a matching registration", kind, id);
            return;
        }

        trace!(target: "display", "{} '{}' loaded from {}", kind, id, path);
        *self.lock_last_loaded() = path.to_owned();
    }
}

impl AssetLoadListener for LoadingProgress {
    fn model_registered(&self, id: &str, path: &str) {
        trace!(target: "display", "Model '{}' registered ({})", id, path);
        self.models_registered.fetch_add(1, Ordering::AcqRel);
    }

    fn texture_registered(&self, id: &str, path: &str) {
        trace!(target: "display", "Texture '{}' registered ({})", id, path);
        self.textures_registered.fetch_add(1, Ordering::AcqRel);
    }

    fn model_loaded(&self, id: &str, path: &str) {
        self.record_loaded("Model", &self.models_loaded, &self.models_registered, id, path);
    }

    fn texture_loaded(&self, id: &str, path: &str) {
        self.record_loaded("Texture", &self.textures_loaded, &self.textures_registered, id, path);
    }
}

//=== DefaultLoadingScreenDisplay =========================================

/// Seconds each spinner frame stays on screen.
const FRAME_DURATION: f32 = 0.1;
const FRAME_COUNT: usize = 8;

/// Progress bar plus a spinner advanced by frame time.
#[derive(Debug)]
pub struct DefaultLoadingScreenDisplay {
    name: String,
    progress: Arc<LoadingProgress>,
    frame: usize,
    frame_timer: f32,
    shown: ProgressSnapshot,
}

impl DefaultLoadingScreenDisplay {
    /// Loading screen with its own progress counters.
    pub fn new(name: &str) -> Self {
        Self::with_progress(name, Arc::new(LoadingProgress::new()))
    }

    /// Loading screen reading counters an asset loader already holds.
    pub fn with_progress(name: &str, progress: Arc<LoadingProgress>) -> Self {
        Self {
            name: name.to_owned(),
            progress,
            frame: 0,
            frame_timer: 0.0,
            shown: ProgressSnapshot::default(),
        }
    }

    /// Handle to hand to the asset loader.
    pub fn progress(&self) -> Arc<LoadingProgress> {
        Arc::clone(&self.progress)
    }

    /// Current spinner frame in `0..FRAME_COUNT`.
    pub fn animation_frame(&self) -> usize {
        self.frame
    }

    /// Counters as of the last update.
    pub fn shown_progress(&self) -> ProgressSnapshot {
        self.shown
    }

    fn advance_animation(&mut self, dt: f32) {
        self.frame_timer += dt;
        while self.frame_timer >= FRAME_DURATION {
            self.frame_timer -= FRAME_DURATION;
            self.frame = (self.frame + 1) % FRAME_COUNT;
        }
    }
}

impl Display for DefaultLoadingScreenDisplay {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_save(&self) -> CompoundTag {
        CompoundTag::new()
    }

    fn on_switch(&mut self, _ctx: &mut DisplayContext<'_>) {
        debug!(target: "display", "Loading screen '{}' shown", self.name);
        self.frame = 0;
        self.frame_timer = 0.0;
    }

    fn update(&mut self, ctx: &mut DisplayContext<'_>) {
        self.advance_animation(ctx.window.delta_seconds());
        self.shown = self.progress.snapshot();
    }

    fn render(&mut self, _ctx: &mut DisplayContext<'_>) {
        trace!(
            target: "display",
            "Loading {:.0}% (frame {}, last '{}')",
            self.shown.fraction() * 100.0,
            self.frame,
            self.progress.last_loaded()
        );
    }

    fn allocate(&self, name: &str) -> Box<dyn Display> {
        Box::new(Self::new(name))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn empty_progress_is_complete() {
        let progress = LoadingProgress::new();
        assert_eq!(progress.fraction(), 1.0);
        assert!(progress.snapshot().is_complete());
        assert_eq!(progress.last_loaded(), "");
    }

    #[test]
    fn loads_without_registration_are_ignored() {
        let progress = LoadingProgress::new();
        progress.model_loaded("ghost", "ghost.obj");
        assert_eq!(progress.snapshot().models_loaded, 0);
        assert_eq!(progress.last_loaded(), "");
    }

    #[test]
    fn fraction_counts_models_and_textures() {
        let progress = LoadingProgress::new();
        progress.model_registered("crate", "crate.obj");
        progress.texture_registered("wood", "wood.png");
        progress.texture_registered("metal", "metal.png");
        progress.texture_registered("rust", "rust.png");
        progress.texture_loaded("wood", "wood.png");

        assert_eq!(progress.fraction(), 0.25);
        assert_eq!(progress.last_loaded(), "wood.png");
    }

    #[test]
    fn concurrent_loads_stay_bounded_and_monotonic() {
        const THREADS: usize = 4;
        const ASSETS: usize = 250;

        let progress = LoadingProgress::new();

        thread::scope(|scope| {
            for t in 0..THREADS {
                let progress = &progress;
                scope.spawn(move || {
                    for i in 0..ASSETS {
                        let path = format!("asset_{}_{}", t, i);
                        progress.model_registered(&path, &path);
                        progress.texture_registered(&path, &path);
                        progress.model_loaded(&path, &path);
                        progress.texture_loaded(&path, &path);
                    }
                });
            }

            let progress = &progress;
            scope.spawn(move || {
                let mut previous = ProgressSnapshot::default();
                for _ in 0..10_000 {
                    let now = progress.snapshot();
                    assert!(now.models_loaded <= now.models_registered);
                    assert!(now.textures_loaded <= now.textures_registered);
                    assert!(now.models_loaded >= previous.models_loaded);
                    assert!(now.textures_loaded >= previous.textures_loaded);
                    previous = now;
                }
            });
        });

        let done = progress.snapshot();
        assert_eq!(done.models_loaded, THREADS * ASSETS);
        assert_eq!(done.textures_registered, THREADS * ASSETS);
        assert!(done.is_complete());
    }

    #[test]
    fn animation_advances_by_elapsed_time() {
        let mut screen = DefaultLoadingScreenDisplay::new("loading");
        screen.advance_animation(0.25);
        assert_eq!(screen.animation_frame(), 2);

        screen.advance_animation(FRAME_DURATION * FRAME_COUNT as f32);
        assert_eq!(screen.animation_frame(), 2);
    }
}
