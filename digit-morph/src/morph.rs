use std::time::Duration;

use kurbo::Size;
use log::{debug, trace};

use crate::config::{MorphConfig, StrokeStyle};
use crate::easing::{Easing, Interpolator};
use crate::error::Error;
use crate::glyph::{Digit, GlyphTable};
use crate::path;
use crate::scale::ScaledTable;
use crate::surface::Surface;

/// Where the engine is in a morph.
///
/// `current_frame` stays within `1..=max_frames + 1`; passing `max_frames`
/// commits `next_digit` as the displayed digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphState {
    pub current_digit: Digit,
    pub next_digit: Digit,
    pub current_frame: u32,
    /// `None` until the first tick after creation or a timing change.
    pub max_frames: Option<u32>,
}

impl Default for MorphState {
    fn default() -> Self {
        Self {
            current_digit: Digit::ZERO,
            next_digit: Digit::ZERO,
            current_frame: 1,
            max_frames: None,
        }
    }
}

/// A single morphing digit, stepped by an external clock.
///
/// Every frame is handed to the wrapped [`Surface`]. The engine owns no
/// timer: call [`DigitMorph::on_clock_tick`] once per clock signal while
/// [`DigitMorph::is_paused`] is false.
pub struct DigitMorph<S: Surface> {
    surface: S,
    config: MorphConfig,
    easing: Box<dyn Easing>,
    table: GlyphTable,
    scaled: ScaledTable,
    state: MorphState,
    paused: bool,
}

impl<S: Surface> DigitMorph<S> {
    /// Starts idle on 0, sized to the stroke's intrinsic size, and draws it.
    pub fn new(surface: S, config: MorphConfig) -> Self {
        let table = GlyphTable::load();
        let scaled = ScaledTable::new(&table, config.stroke.intrinsic_size());

        let mut morph = Self {
            surface,
            easing: Box::new(config.easing),
            config,
            table,
            scaled,
            state: MorphState::default(),
            paused: true,
        };

        morph.draw_static();
        morph
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.resize(size);
        self
    }

    pub fn state(&self) -> MorphState {
        self.state
    }

    pub fn current_digit(&self) -> Digit {
        self.state.current_digit
    }

    pub fn next_digit(&self) -> Digit {
        self.state.next_digit
    }

    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    pub fn stroke(&self) -> &StrokeStyle {
        &self.config.stroke
    }

    /// Changing `font_size` through this does not rescale; use
    /// [`DigitMorph::set_font_size`] or follow with [`DigitMorph::resize`].
    pub fn stroke_mut(&mut self) -> &mut StrokeStyle {
        &mut self.config.stroke
    }

    /// Updates the stroke (line width follows) and rescales to the new
    /// intrinsic size.
    pub fn set_font_size(&mut self, font_size: f64) -> Result<(), Error> {
        self.config.stroke.set_font_size(font_size)?;
        self.resize(self.config.stroke.intrinsic_size());
        Ok(())
    }

    pub fn size(&self) -> Size {
        self.scaled.size()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn set_interpolator(&mut self, interpolator: Interpolator) {
        self.config.easing = interpolator;
        self.easing = Box::new(interpolator);
    }

    /// Installs a custom easing. `config().easing` keeps the last built-in one.
    pub fn set_easing(&mut self, easing: impl Easing + 'static) {
        self.easing = Box::new(easing);
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.config.duration = duration;
        self.state.max_frames = None;
    }

    pub fn set_fps(&mut self, fps: u32) {
        self.config.fps = fps;
        self.state.max_frames = None;
    }

    /// Jumps to `digit` without animating, cancelling any morph in flight.
    pub fn set_digit_immediate(&mut self, digit: Digit) {
        self.state.current_digit = digit;
        self.state.next_digit = digit;
        self.state.current_frame = 1;
        self.paused = true;

        debug!("digit set to {digit} without animation");
        self.draw_static();
    }

    /// Morphs from the last target towards `digit`.
    ///
    /// A morph already in flight is redirected: it restarts at frame 1 from
    /// its previous target, not from the shape currently on screen.
    pub fn animate_to(&mut self, digit: Digit) {
        if !self.paused {
            debug!(
                "redirecting morph {} -> {} at frame {} to {digit}",
                self.state.current_digit, self.state.next_digit, self.state.current_frame
            );
        }

        self.state.current_digit = self.state.next_digit;
        self.state.next_digit = digit;
        self.state.current_frame = 1;
        self.paused = false;

        debug!("morph {} -> {digit}", self.state.current_digit);
    }

    pub fn on_clock_tick(&mut self) {
        if self.paused {
            return;
        }

        let max_frames = self.max_frames();
        let progress = f64::from(self.state.current_frame) / f64::from(max_frames);
        let factor = self.easing.interpolation(progress);

        trace!(
            "frame {}/{max_frames} progress {progress:.3} factor {factor:.3}",
            self.state.current_frame
        );

        let cur = self.scaled.glyph(self.state.current_digit);
        let next = self.scaled.glyph(self.state.next_digit);
        let frame = path::build_glyph(&cur.lerp(next, factor));
        self.surface.present(&frame);

        self.state.current_frame += 1;

        if self.state.current_frame > max_frames {
            self.state.current_frame = 1;
            self.state.current_digit = self.state.next_digit;
            self.paused = true;

            debug!("morph settled on {}", self.state.current_digit);
            self.draw_static();
        }
    }

    /// Rescales every glyph into the new box. An idle digit is redrawn at once.
    pub fn resize(&mut self, size: Size) {
        if size == self.scaled.size() {
            return;
        }

        debug!("resizing {:?} -> {size:?}", self.scaled.size());
        self.scaled = ScaledTable::new(&self.table, size);

        if self.paused {
            self.draw_static();
        }
    }

    fn max_frames(&mut self) -> u32 {
        if let Some(max_frames) = self.state.max_frames {
            return max_frames;
        }

        let max_frames = self.config.max_frames();
        debug!(
            "{max_frames} frames per morph ({:?} at {} fps)",
            self.config.duration, self.config.fps
        );

        self.state.max_frames = Some(max_frames);
        self.state.current_frame = self.state.current_frame.min(max_frames);
        max_frames
    }

    fn draw_static(&mut self) {
        self.surface.present(self.scaled.path(self.state.current_digit));
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{BezPath, PathEl, Point};
    use pretty_assertions::assert_eq;

    use super::*;

    fn digit(d: u8) -> Digit {
        Digit::new(d).unwrap()
    }

    fn linear_config() -> MorphConfig {
        MorphConfig {
            easing: Interpolator::Linear,
            ..MorphConfig::default()
        }
    }

    fn recorder(config: MorphConfig) -> DigitMorph<Vec<BezPath>> {
        let _ = env_logger::builder().is_test(true).try_init();
        DigitMorph::new(Vec::new(), config).with_size(Size::new(100.0, 100.0))
    }

    fn points(path: &BezPath) -> Vec<Point> {
        path.elements()
            .iter()
            .flat_map(|el| match *el {
                PathEl::MoveTo(p) => vec![p],
                PathEl::CurveTo(a, b, c) => vec![a, b, c],
                _ => unreachable!("glyph paths only move and curve"),
            })
            .collect()
    }

    fn assert_paths_close(a: &BezPath, b: &BezPath) {
        let (a, b) = (points(a), points(b));
        assert_eq!(a.len(), b.len());

        for (p, q) in a.iter().zip(&b) {
            assert!(
                (p.x - q.x).abs() < 1e-9 && (p.y - q.y).abs() < 1e-9,
                "{p:?} != {q:?}"
            );
        }
    }

    #[test]
    fn starts_idle_on_zero() {
        let morph = recorder(MorphConfig::default());

        assert!(morph.is_paused());
        assert_eq!(morph.state(), MorphState::default());
        assert_eq!(morph.surface().last(), Some(morph.scaled.path(Digit::ZERO)));
    }

    #[test]
    fn paused_clock_does_not_advance() {
        let mut morph = recorder(MorphConfig::default());
        let drawn = morph.surface().len();

        morph.on_clock_tick();

        assert_eq!(morph.surface().len(), drawn);
        assert_eq!(morph.state().max_frames, None);
    }

    #[test]
    fn runs_to_completion_after_max_frames_ticks() {
        let mut morph = recorder(MorphConfig::default());
        morph.animate_to(digit(7));

        let max_frames = morph.config().max_frames();
        for _ in 0..max_frames {
            assert!(!morph.is_paused());
            morph.on_clock_tick();
        }

        let state = morph.state();
        assert_eq!(state.current_digit, digit(7));
        assert_eq!(state.next_digit, digit(7));
        assert_eq!(state.current_frame, 1);
        assert_eq!(state.max_frames, Some(30));
        assert!(morph.is_paused());

        assert_eq!(morph.surface().last(), Some(morph.scaled.path(digit(7))));
    }

    #[test]
    fn first_frame_uses_eased_progress() {
        let mut morph = recorder(linear_config());
        morph.animate_to(digit(1));
        morph.on_clock_tick();

        let from = morph.scaled.glyph(Digit::ZERO);
        let to = morph.scaled.glyph(digit(1));
        let expected = path::build_glyph(&from.lerp(to, 1.0 / 30.0));

        assert_paths_close(morph.surface().last().unwrap(), &expected);
        assert_eq!(morph.state().current_frame, 2);
    }

    #[test]
    fn final_interpolated_frame_lands_on_target() {
        let mut morph = recorder(linear_config());
        morph.animate_to(digit(3));

        for _ in 0..30 {
            morph.on_clock_tick();
        }

        let drawn = morph.surface();
        let interpolated = &drawn[drawn.len() - 2];
        assert_paths_close(interpolated, morph.scaled.path(digit(3)));
    }

    #[test]
    fn same_digit_morph_is_degenerate_but_completes() {
        let mut morph = recorder(MorphConfig::default());
        morph.set_digit_immediate(digit(4));
        let before = morph.surface().len();

        morph.animate_to(digit(4));
        while !morph.is_paused() {
            morph.on_clock_tick();
        }

        let state = morph.state();
        assert_eq!(state.current_digit, digit(4));
        assert_eq!(state.next_digit, digit(4));
        assert_eq!(state.current_frame, 1);

        let target = morph.scaled.path(digit(4));
        assert_eq!(morph.surface().len(), before + 31);
        assert!(morph.surface()[before..].iter().all(|p| p == target));
    }

    #[test]
    fn immediate_set_cancels_morph() {
        let mut morph = recorder(MorphConfig::default());
        morph.animate_to(digit(5));
        for _ in 0..3 {
            morph.on_clock_tick();
        }

        morph.set_digit_immediate(digit(2));

        let state = morph.state();
        assert_eq!((state.current_digit, state.next_digit), (digit(2), digit(2)));
        assert_eq!(state.current_frame, 1);
        assert!(morph.is_paused());
        assert_eq!(morph.surface().last(), Some(morph.scaled.path(digit(2))));

        let drawn = morph.surface().len();
        morph.on_clock_tick();
        assert_eq!(morph.surface().len(), drawn);
    }

    #[test]
    fn redirect_mid_flight_starts_from_previous_target() {
        let mut morph = recorder(MorphConfig::default());
        morph.animate_to(digit(3));
        for _ in 0..5 {
            morph.on_clock_tick();
        }

        morph.animate_to(digit(8));

        let state = morph.state();
        assert_eq!(state.current_digit, digit(3));
        assert_eq!(state.next_digit, digit(8));
        assert_eq!(state.current_frame, 1);
        assert!(!morph.is_paused());
    }

    #[test]
    fn zero_duration_completes_in_one_tick() {
        let mut morph = recorder(MorphConfig {
            duration: Duration::ZERO,
            ..MorphConfig::default()
        });
        morph.animate_to(digit(9));
        morph.on_clock_tick();

        assert_eq!(morph.state().max_frames, Some(1));
        assert_eq!(morph.current_digit(), digit(9));
        assert!(morph.is_paused());
    }

    #[test]
    fn resize_mid_morph_only_changes_coordinates() {
        let mut small = recorder(linear_config());
        let mut large = recorder(linear_config());

        for morph in [&mut small, &mut large] {
            morph.animate_to(digit(6));
            for _ in 0..10 {
                morph.on_clock_tick();
            }
        }

        let before = large.state();
        large.resize(Size::new(200.0, 200.0));
        assert_eq!(large.state(), before);
        assert_eq!(large.size(), Size::new(200.0, 200.0));

        small.on_clock_tick();
        large.on_clock_tick();
        assert_eq!(small.state(), large.state());

        let doubled = points(small.surface().last().unwrap())
            .into_iter()
            .map(|p| Point::new(p.x * 2.0, p.y * 2.0));
        for (p, q) in doubled.zip(points(large.surface().last().unwrap())) {
            assert!((p.x - q.x).abs() < 1e-9 && (p.y - q.y).abs() < 1e-9);
        }
    }

    #[test]
    fn resize_while_idle_redraws() {
        let mut morph = recorder(MorphConfig::default());
        let drawn = morph.surface().len();

        morph.resize(Size::new(100.0, 100.0));
        assert_eq!(morph.surface().len(), drawn);

        morph.resize(Size::new(40.0, 80.0));
        assert_eq!(morph.surface().len(), drawn + 1);
        assert_eq!(morph.surface().last(), Some(morph.scaled.path(Digit::ZERO)));
    }

    #[test]
    fn timing_change_recomputes_frame_count() {
        let mut morph = recorder(MorphConfig::default());
        morph.animate_to(digit(1));
        for _ in 0..20 {
            morph.on_clock_tick();
        }
        assert_eq!(morph.state().max_frames, Some(30));

        morph.set_duration(Duration::from_millis(100));
        assert_eq!(morph.state().max_frames, None);

        // Shorter than the frames already played: finishes on the next tick.
        morph.on_clock_tick();
        assert_eq!(morph.state().max_frames, Some(6));
        assert!(morph.is_paused());
        assert_eq!(morph.current_digit(), digit(1));

        morph.set_fps(120);
        morph.animate_to(digit(2));
        morph.on_clock_tick();
        assert_eq!(morph.state().max_frames, Some(12));
    }

    #[test]
    fn custom_easing_is_not_clamped() {
        let mut morph = recorder(MorphConfig::default());
        morph.set_easing(|_: f64| 2.0);
        morph.animate_to(digit(7));
        morph.on_clock_tick();

        let from = morph.scaled.glyph(Digit::ZERO).endpoints[0];
        let to = morph.scaled.glyph(digit(7)).endpoints[0];
        let drawn = points(morph.surface().last().unwrap())[0];

        assert!((drawn.x - (from.x + (to.x - from.x) * 2.0)).abs() < 1e-9);
        assert!((drawn.y - (from.y + (to.y - from.y) * 2.0)).abs() < 1e-9);
    }

    #[test]
    fn interpolator_swap_updates_config() {
        let mut morph = recorder(MorphConfig::default());
        morph.set_interpolator(Interpolator::Bounce);

        assert_eq!(morph.config().easing, Interpolator::Bounce);
    }

    #[test]
    fn font_size_change_rescales_to_intrinsic_size() {
        let mut morph = recorder(MorphConfig::default());
        let drawn = morph.surface().len();

        morph.set_font_size(48.0).unwrap();

        let size = morph.size();
        assert!((size.width - 31.2).abs() < 1e-9);
        assert!((size.height - 57.6).abs() < 1e-9);
        assert_eq!(morph.stroke().line_width, 3.0);
        assert_eq!(morph.surface().len(), drawn + 1);
        assert_eq!(morph.surface().last(), Some(morph.scaled.path(Digit::ZERO)));
    }

    #[test]
    fn bad_font_size_leaves_engine_untouched() {
        let mut morph = recorder(MorphConfig::default());

        assert!(matches!(morph.set_font_size(-4.0), Err(Error::InvalidFontSize(_))));
        assert_eq!(morph.size(), Size::new(100.0, 100.0));
        assert_eq!(*morph.stroke(), StrokeStyle::default());
    }

    #[test]
    fn pause_and_resume_gate_ticks() {
        let mut morph = recorder(MorphConfig::default());
        morph.animate_to(digit(5));
        morph.on_clock_tick();

        morph.pause();
        morph.on_clock_tick();
        assert_eq!(morph.state().current_frame, 2);

        morph.resume();
        morph.on_clock_tick();
        assert_eq!(morph.state().current_frame, 3);
    }
}
