use std::fs::{self, File};
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use kurbo::{BezPath, Size};
use log::info;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use digit_morph::{Digit, DigitMorph, GlyphCanvas, Interpolator, MorphConfig};

const PLACES: u32 = 4;

fn main() -> io::Result<()> {
    init_logging()?;
    let config = load_config()?;

    enable_raw_mode()?;
    crossterm::execute!(io::stdout(), EnterAlternateScreen)?;

    let result = run(config);

    disable_raw_mode()?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)?;

    result
}

/// The terminal owns stderr, so logs only go to `$DIGIT_MORPH_LOG` when set.
fn init_logging() -> io::Result<()> {
    let Some(path) = std::env::var_os("DIGIT_MORPH_LOG") else {
        return Ok(());
    };

    let file = File::create(path)?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}

/// Optional first argument: a JSON `MorphConfig`.
fn load_config() -> io::Result<MorphConfig> {
    let Some(path) = std::env::args_os().nth(1) else {
        return Ok(MorphConfig::default());
    };

    let json = fs::read_to_string(path)?;
    MorphConfig::from_json(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn run(config: MorphConfig) -> io::Result<()> {
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let frame_interval = Duration::from_secs(1) / config.fps.max(1);
    let mut odometer = Odometer::new(config);
    let mut next_tick = Instant::now() + frame_interval;

    loop {
        terminal.draw(|f| odometer.render(f))?;

        let timeout = next_tick.saturating_duration_since(Instant::now());

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Up | KeyCode::Char('+') | KeyCode::Char(' ') => odometer.step(1),
                    KeyCode::Down | KeyCode::Char('-') => odometer.step(-1),
                    KeyCode::Char('e') => odometer.cycle_easing(),
                    KeyCode::Char('0') => odometer.reset(),
                    _ => {}
                }
            }
        }

        let now = Instant::now();

        if now >= next_tick {
            odometer.tick();
            next_tick = (next_tick + frame_interval).max(now);
        }
    }

    Ok(())
}

/// A row of morphing digits showing one counter value, most significant first.
struct Odometer {
    places: Vec<DigitMorph<BezPath>>,
    value: u32,
    easing: Interpolator,
}

impl Odometer {
    fn new(config: MorphConfig) -> Self {
        let easing = config.easing;

        let places = (0..PLACES)
            .map(|_| DigitMorph::new(BezPath::new(), config.clone()))
            .collect();

        Self {
            places,
            value: 0,
            easing,
        }
    }

    fn modulus() -> u32 {
        10u32.pow(PLACES)
    }

    fn digit_at(value: u32, place: usize) -> Digit {
        let power = PLACES - 1 - place as u32;
        Digit::least_significant(value / 10u32.pow(power))
    }

    fn step(&mut self, delta: i64) {
        let modulus = i64::from(Self::modulus());
        let value = (i64::from(self.value) + delta).rem_euclid(modulus) as u32;

        for (place, morph) in self.places.iter_mut().enumerate() {
            let digit = Self::digit_at(value, place);

            if digit != morph.next_digit() {
                morph.animate_to(digit);
            }
        }

        self.value = value;
    }

    fn reset(&mut self) {
        for morph in &mut self.places {
            morph.set_digit_immediate(Digit::ZERO);
        }

        self.value = 0;
    }

    /// Steps through the stock curves; a configured curve outside them leads to the first.
    fn cycle_easing(&mut self) {
        let all = Interpolator::ALL;
        let next = all
            .iter()
            .position(|i| *i == self.easing)
            .map_or(0, |i| (i + 1) % all.len());

        self.easing = all[next];
        info!("easing switched to {}", self.easing.name());

        for morph in &mut self.places {
            morph.set_interpolator(self.easing);
        }
    }

    fn tick(&mut self) {
        for morph in self.places.iter_mut().filter(|m| !m.is_paused()) {
            morph.on_clock_tick();
        }
    }

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(f.area());

        let easing = self.easing.name();
        f.render_widget(
            Paragraph::new(format!(
                "digit-morph  {:0width$}  [{easing}]  [↑/↓ count] [e easing] [0 reset] [q quit]",
                self.value,
                width = PLACES as usize,
            ))
            .style(Style::new().fg(Color::DarkGray)),
            chunks[0],
        );

        let columns = Layout::horizontal(vec![Constraint::Ratio(1, PLACES); PLACES as usize])
            .split(chunks[1]);

        for (morph, &column) in self.places.iter_mut().zip(columns.iter()) {
            let block = Block::bordered();
            let inner = block.inner(column);
            f.render_widget(block, column);

            // Braille cells are 2x4 dots.
            morph.resize(Size::new(
                f64::from(inner.width) * 2.0,
                f64::from(inner.height) * 4.0,
            ));

            f.render_widget(
                GlyphCanvas::new(morph.surface(), morph.size()).style(*morph.stroke()),
                inner,
            );
        }
    }
}
