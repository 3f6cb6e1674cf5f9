//! Sequencing of play and wait phases against a frame loop.

use std::cell::RefCell;
use std::rc::Rc;

use kinema_core::{Clock, Color, Duration, SystemClock};

use crate::animation::Animation;
use crate::object::Drawable;
use crate::pacing::Pacer;
use crate::render::RenderSink;
use crate::scene::Scene;

/// Why a play, wait, or show call returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every animation in the batch finished.
    Completed,
    /// The requested run time elapsed.
    Elapsed,
    /// The render sink asked to quit.
    Quit,
}

/// Summary of one play, wait, or show call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackReport {
    pub frames: u64,
    pub elapsed: Duration,
    pub outcome: Outcome,
}

impl PlaybackReport {
    pub fn was_interrupted(&self) -> bool {
        self.outcome == Outcome::Quit
    }
}

/// Drives a [`Scene`] through a render sink, one frame at a time.
///
/// Each frame polls for quit, advances the time manager once, draws every
/// object, presents, and then paces. The whole active set is advanced
/// before anything is drawn, so no frame shows a half-updated tick. A quit
/// request stops the current call but keeps whatever has been written.
pub struct Director<R: RenderSink, P: Pacer> {
    scene: Scene,
    sink: R,
    pacer: P,
    clock: Rc<dyn Clock>,
}

impl<R: RenderSink, P: Pacer> Director<R, P> {
    /// Director on the wall clock.
    pub fn new(sink: R, pacer: P) -> Self {
        Self::with_clock(sink, pacer, Rc::new(SystemClock::new()))
    }

    /// Director on an injected clock, shared with the scene's time manager.
    pub fn with_clock(mut sink: R, pacer: P, clock: Rc<dyn Clock>) -> Self {
        let scene = Scene::new(clock.clone());
        sink.set_clear_color(scene.background());
        Self {
            scene,
            sink,
            pacer,
            clock,
        }
    }

    pub fn add<D: Drawable + 'static>(&mut self, object: &Rc<RefCell<D>>) -> &mut Self {
        self.scene.add(object);
        self
    }

    pub fn remove<D: Drawable + 'static>(&mut self, object: &Rc<RefCell<D>>) -> &mut Self {
        self.scene.remove(object);
        self
    }

    /// Remove all objects and pending animations.
    pub fn clear(&mut self) {
        self.scene.clear();
    }

    pub fn set_background_color(&mut self, color: Color) -> &mut Self {
        self.scene.set_background_color(color);
        self.sink.set_clear_color(color);
        self
    }

    /// Run `animations` concurrently until all finish or the sink quits,
    /// then clear the time manager.
    pub fn play(&mut self, animations: impl IntoIterator<Item = Animation>) -> PlaybackReport {
        self.play_inner(animations, None)
    }

    /// Run `animations` for exactly `run_time_secs`, whether or not they
    /// finish in that time. Unfinished animations are cut off mid-flight.
    pub fn play_for(
        &mut self,
        animations: impl IntoIterator<Item = Animation>,
        run_time_secs: f64,
    ) -> PlaybackReport {
        self.play_inner(animations, Some(Duration::from_seconds(run_time_secs)))
    }

    /// Keep rendering for `duration_secs`, advancing only what is already
    /// active.
    pub fn wait(&mut self, duration_secs: f64) -> PlaybackReport {
        let limit = Duration::from_seconds(duration_secs);
        tracing::info!("waiting {}", limit);
        self.run_until(Some(limit), true)
    }

    /// Render the scene as it is for `duration_secs` without advancing any
    /// animation.
    pub fn show(&mut self, duration_secs: f64) -> PlaybackReport {
        let limit = Duration::from_seconds(duration_secs);
        tracing::info!("showing static scene for {}", limit);
        self.run_until(Some(limit), false)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut R {
        &mut self.sink
    }

    pub fn clock(&self) -> &Rc<dyn Clock> {
        &self.clock
    }

    pub fn into_sink(self) -> R {
        self.sink
    }

    fn play_inner(
        &mut self,
        animations: impl IntoIterator<Item = Animation>,
        run_time: Option<Duration>,
    ) -> PlaybackReport {
        let time_manager = self.scene.time_manager_mut();
        for animation in animations {
            time_manager.add_animation(animation);
        }
        tracing::info!(
            "playing {} animation(s){}",
            time_manager.active_count(),
            run_time
                .map(|limit| format!(" for {}", limit))
                .unwrap_or_default()
        );

        let report = self.run_until(run_time, true);
        self.scene.time_manager_mut().clear();
        report
    }

    /// Frame loop. With a limit it runs until the limit elapses; without
    /// one it runs until the time manager is empty.
    fn run_until(&mut self, limit: Option<Duration>, animate: bool) -> PlaybackReport {
        let started = self.clock.now();
        let mut frames = 0u64;

        let outcome = loop {
            match limit {
                Some(limit) => {
                    if self.clock.now().duration_since(started) >= limit {
                        break Outcome::Elapsed;
                    }
                }
                None => {
                    if self.scene.time_manager().is_all_finished() {
                        break Outcome::Completed;
                    }
                }
            }
            if self.sink.should_quit() {
                tracing::info!("quit requested after {} frame(s)", frames);
                break Outcome::Quit;
            }
            self.frame(animate);
            frames += 1;
        };

        let report = PlaybackReport {
            frames,
            elapsed: self.clock.now().duration_since(started),
            outcome,
        };
        tracing::debug!(
            "{:?} after {} frame(s) in {}",
            report.outcome,
            report.frames,
            report.elapsed
        );
        report
    }

    fn frame(&mut self, animate: bool) {
        if animate {
            self.scene.time_manager_mut().update();
        }

        self.sink.clear_screen();
        for object in self.scene.objects() {
            let object = object.borrow();
            let vertices = object.vertices();
            self.sink.draw_triangle(&vertices, object.color());
        }
        self.sink.present();
        tracing::trace!("presented frame with {} object(s)", self.scene.object_count());

        self.pacer.pace();
    }
}
