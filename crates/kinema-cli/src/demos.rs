//! Built-in demo sequences.

use std::f32::consts::{PI, TAU};

use kinema_core::{Color, Easing, PlaybackConfig};
use kinema_scene::{
    color_to, move_to, rotate_to, scale_to, shared, Animation, Director, Pacer, PlaybackReport,
    RenderSink, Triangle,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Demo {
    /// One triangle: move, rotate, scale, recolor
    Simple,
    /// Three triangles animated in lockstep
    Group,
    /// Grow and recolor, spin, then shrink and fade
    Finale,
    /// All of the above in order
    All,
}

/// Duration and easing used where a demo step does not pick its own.
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    pub duration: f64,
    pub easing: Easing,
}

impl Timing {
    pub fn from_config(playback: &PlaybackConfig) -> Self {
        Self {
            duration: playback.default_duration,
            easing: playback.default_easing,
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::from_config(&PlaybackConfig::default())
    }
}

/// Reports for every phase that ran, in order.
pub fn run<R: RenderSink, P: Pacer>(
    demo: Demo,
    director: &mut Director<R, P>,
    timing: Timing,
) -> Vec<PlaybackReport> {
    let mut script = Script {
        director,
        timing,
        reports: Vec::new(),
    };
    match demo {
        Demo::Simple => simple(&mut script),
        Demo::Group => group(&mut script),
        Demo::Finale => finale(&mut script),
        Demo::All => {
            simple(&mut script);
            group(&mut script);
            finale(&mut script);
        }
    }
    script.reports
}

/// Runs phases back to back and stops issuing new ones after a quit.
struct Script<'a, R: RenderSink, P: Pacer> {
    director: &'a mut Director<R, P>,
    timing: Timing,
    reports: Vec<PlaybackReport>,
}

impl<R: RenderSink, P: Pacer> Script<'_, R, P> {
    fn quit(&self) -> bool {
        self.reports.last().is_some_and(|r| r.was_interrupted())
    }

    fn play(&mut self, label: &str, animations: Vec<Animation>) {
        if self.quit() {
            return;
        }
        tracing::info!("{}", label);
        let report = self.director.play(animations);
        self.reports.push(report);
    }

    fn wait(&mut self, seconds: f64) {
        if self.quit() {
            return;
        }
        let report = self.director.wait(seconds);
        self.reports.push(report);
    }
}

fn simple<R: RenderSink, P: Pacer>(script: &mut Script<'_, R, P>) {
    let Timing { duration, easing } = script.timing;
    let tri = shared(Triangle::equilateral(1.2, Color::RED));
    tri.borrow_mut().move_to((-3.0, 0.0));
    script.director.add(&tri);

    script.play(
        "moving across",
        vec![move_to(&tri, (3.0, 0.0), 2.0, Easing::EaseInOut)],
    );
    script.play(
        "returning to center",
        vec![move_to(&tri, (0.0, 0.0), duration, easing)],
    );
    script.play("spinning", vec![rotate_to(&tri, TAU, 1.5, Easing::Linear)]);
    script.play(
        "growing",
        vec![scale_to(&tri, 2.0, 1.0, Easing::EaseOutQuad)],
    );
    script.play("settling", vec![scale_to(&tri, 0.8, 0.8, easing)]);
    script.play("turning green", vec![color_to(&tri, Color::GREEN, 1.5, easing)]);
    // Built after the previous phase, so the fade starts from green.
    script.play(
        "turning sky blue",
        vec![color_to(&tri, (0.0, 0.5, 1.0), duration, easing)],
    );

    script.director.remove(&tri);
}

fn group<R: RenderSink, P: Pacer>(script: &mut Script<'_, R, P>) {
    let easing = script.timing.easing;
    let red = shared(Triangle::equilateral(1.0, Color::RED));
    let green = shared(Triangle::equilateral(1.0, Color::GREEN));
    let blue = shared(Triangle::equilateral(1.0, Color::BLUE));
    red.borrow_mut().move_to((-2.5, -1.5));
    green.borrow_mut().move_to((0.0, -1.5));
    blue.borrow_mut().move_to((2.5, -1.5));
    script.director.add(&red).add(&green).add(&blue);

    script.play(
        "rising together",
        vec![
            move_to(&red, (-1.5, 1.5), 2.0, easing),
            move_to(&green, (0.0, 1.5), 2.0, easing),
            move_to(&blue, (1.5, 1.5), 2.0, easing),
        ],
    );
    script.play(
        "turning together",
        vec![
            rotate_to(&red, PI, 1.5, easing),
            rotate_to(&green, -PI, 1.5, easing),
            rotate_to(&blue, TAU, 1.5, easing),
        ],
    );
    script.play(
        "gathering",
        vec![
            move_to(&red, (-0.5, 0.0), 1.5, easing),
            move_to(&green, (0.0, 0.0), 1.5, easing),
            move_to(&blue, (0.5, 0.0), 1.5, easing),
            scale_to(&red, 0.6, 1.5, easing),
            scale_to(&green, 0.8, 1.5, easing),
            scale_to(&blue, 0.6, 1.5, easing),
        ],
    );
    script.wait(1.0);

    script.director.clear();
}

fn finale<R: RenderSink, P: Pacer>(script: &mut Script<'_, R, P>) {
    let easing = script.timing.easing;
    let tri = shared(Triangle::equilateral(0.2, Color::rgb(1.0, 0.5, 0.0)));
    script.director.clear();
    script.director.add(&tri);

    script.play(
        "blooming",
        vec![
            scale_to(&tri, 3.0, 2.0, Easing::EaseOutQuad),
            color_to(&tri, (0.8, 0.2, 0.9), 2.0, easing),
        ],
    );
    script.play(
        "spinning twice",
        vec![rotate_to(&tri, 2.0 * TAU, 2.0, Easing::EaseInOut)],
    );
    script.play(
        "fading out",
        vec![
            scale_to(&tri, 0.1, 1.5, Easing::EaseInQuad),
            color_to(&tri, (0.1, 0.1, 0.1), 1.5, easing),
        ],
    );
    script.wait(0.5);

    script.director.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinema_core::ManualClock;
    use kinema_scene::{Outcome, RecordingSink, SimulatedPacer};
    use std::rc::Rc;

    fn headless(quit_after: Option<usize>) -> Director<RecordingSink, SimulatedPacer> {
        let clock = ManualClock::new();
        let pacer = SimulatedPacer::new(clock.clone(), 30);
        let sink = match quit_after {
            Some(frames) => RecordingSink::new().quit_after(frames),
            None => RecordingSink::new(),
        };
        Director::with_clock(sink, pacer, Rc::new(clock))
    }

    #[test]
    fn test_simple_runs_every_phase() {
        let mut director = headless(None);
        let reports = run(Demo::Simple, &mut director, Timing::default());
        assert_eq!(reports.len(), 7);
        assert!(reports.iter().all(|r| r.outcome == Outcome::Completed));
        assert!(director.scene().is_empty());
    }

    #[test]
    fn test_group_ends_with_wait() {
        let mut director = headless(None);
        let reports = run(Demo::Group, &mut director, Timing::default());
        assert_eq!(reports.len(), 4);
        assert_eq!(reports[3].outcome, Outcome::Elapsed);
        assert!(director.scene().is_empty());
    }

    #[test]
    fn test_all_runs_every_demo() {
        let mut director = headless(None);
        let reports = run(Demo::All, &mut director, Timing::default());
        assert_eq!(reports.len(), 7 + 4 + 4);
        assert!(director.sink().frame_count() > 0);
    }

    #[test]
    fn test_quit_stops_the_script() {
        let mut director = headless(Some(10));
        let reports = run(Demo::All, &mut director, Timing::default());
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].outcome, Outcome::Quit);
        assert_eq!(director.sink().frame_count(), 10);
    }

    #[test]
    fn test_timing_follows_config() {
        let playback = PlaybackConfig {
            default_duration: 0.25,
            default_easing: Easing::Linear,
            ..PlaybackConfig::default()
        };
        let timing = Timing::from_config(&playback);
        assert_eq!(timing.duration, 0.25);
        assert_eq!(timing.easing, Easing::Linear);
    }
}
