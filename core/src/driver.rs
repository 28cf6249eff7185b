use core::time::Duration;
use thiserror::Error;

use crate::*;

/// Device glue that reports which buttons are held right now.
pub trait InputSource {
    /// `None` once the source has nothing more to give and the loop should stop.
    fn sample(&mut self) -> Option<Buttons>;
}

/// Device glue that draws a finished frame.
pub trait Renderer {
    type Error;

    fn draw(&mut self, frame: &Frame) -> core::result::Result<(), Self::Error>;
}

/// Entropy for bomb placement, read once at startup.
pub trait SeedSource {
    fn seed(&mut self) -> u64;
}

/// A seed known up front.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FixedSeed(pub u64);

impl SeedSource for FixedSeed {
    fn seed(&mut self) -> u64 {
        self.0
    }
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub tiles: ViewportGrid,
    /// Board cell shown in the viewport's top-left corner.
    pub offset: Coord2,
    pub cursor: Coord2,
    /// Where the cursor sprite goes inside the viewport.
    pub cursor_px: (i32, i32),
    pub state: GameState,
    pub mines_left: i32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameConfig {
    pub viewport: Viewport,
    /// Minimum time between two draws.
    pub frame_delay: Duration,
    pub tile_px: u16,
}

impl FrameConfig {
    pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_nanos(1_000_000_000 / 30);
    pub const DEFAULT_TILE_PX: u16 = 16;
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            frame_delay: Self::DEFAULT_FRAME_DELAY,
            tile_px: Self::DEFAULT_TILE_PX,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum DriverError<E> {
    #[error("game error: {0}")]
    Game(#[from] GameError),
    #[error("renderer error: {0:?}")]
    Render(E),
}

/// Outcome of one loop iteration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tick {
    pub report: TurnReport,
    pub won: bool,
    pub rendered: bool,
}

/// Runs the game loop: input and state every iteration, drawing at most once per frame delay.
#[derive(Clone, Debug)]
pub struct FrameDriver<G = RandomBoardGenerator> {
    session: GameSession<G>,
    edges: EdgeDetector,
    config: FrameConfig,
    last_render: Option<Duration>,
}

impl<G: BoardGenerator> FrameDriver<G> {
    pub fn new(session: GameSession<G>, config: FrameConfig) -> Result<Self> {
        config.viewport.validate()?;
        Ok(Self {
            session,
            edges: EdgeDetector::new(),
            config,
            last_render: None,
        })
    }

    pub fn session(&self) -> &GameSession<G> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession<G> {
        &mut self.session
    }

    /// One iteration at time `now`, measured from any fixed epoch.
    ///
    /// Returns `None` without touching the game when the input source is exhausted.
    pub fn tick<R: Renderer>(
        &mut self,
        now: Duration,
        input: &mut impl InputSource,
        renderer: &mut R,
    ) -> core::result::Result<Option<Tick>, DriverError<R::Error>> {
        let Some(held) = input.sample() else {
            return Ok(None);
        };

        let released = self.edges.released(held);
        let report = self.session.apply(released)?;
        let won = self.session.evaluate();

        let due = self
            .last_render
            .is_none_or(|last| now.saturating_sub(last) >= self.config.frame_delay);
        if due {
            self.render(now, renderer)?;
        }

        Ok(Some(Tick {
            report,
            won,
            rendered: due,
        }))
    }

    /// Draws immediately, bypassing the frame gate.
    pub fn render<R: Renderer>(
        &mut self,
        now: Duration,
        renderer: &mut R,
    ) -> core::result::Result<(), DriverError<R::Error>> {
        let frame = self.frame();
        renderer.draw(&frame).map_err(DriverError::Render)?;
        self.last_render = Some(now);
        Ok(())
    }

    /// Projects the camera around the cursor.
    pub fn frame(&self) -> Frame {
        let viewport = self.config.viewport;
        let cursor = self.session.cursor();
        let offset = viewport.top_left(cursor, self.session.size());
        Frame {
            tiles: project(self.session.visible(), offset, viewport.size),
            offset,
            cursor,
            cursor_px: cursor_pixel(cursor, offset, self.config.tile_px),
            state: self.session.state(),
            mines_left: self.session.mines_left(),
        }
    }

    /// Ticks until the input source runs dry.
    pub fn run<R: Renderer>(
        &mut self,
        mut clock: impl FnMut() -> Duration,
        input: &mut impl InputSource,
        renderer: &mut R,
    ) -> core::result::Result<(), DriverError<R::Error>> {
        while self.tick(clock(), input, renderer)?.is_some() {}
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::VecDeque;
    use alloc::vec::Vec;

    struct Script(VecDeque<Buttons>);

    impl Script {
        fn new(samples: &[Buttons]) -> Self {
            Self(samples.iter().copied().collect())
        }
    }

    impl InputSource for Script {
        fn sample(&mut self) -> Option<Buttons> {
            self.0.pop_front()
        }
    }

    #[derive(Default)]
    struct Recorder(Vec<Frame>);

    impl Renderer for Recorder {
        type Error = ();

        fn draw(&mut self, frame: &Frame) -> core::result::Result<(), ()> {
            self.0.push(frame.clone());
            Ok(())
        }
    }

    fn driver(size: Coord2, bombs: &[Coord2], start: Coord2) -> FrameDriver<FixedBoardGenerator> {
        let config = GameConfig::new(size, bombs.len() as CellCount)
            .unwrap()
            .with_start(start);
        let session = GameSession::new(config, FixedBoardGenerator::new(bombs)).unwrap();
        FrameDriver::new(session, FrameConfig::default()).unwrap()
    }

    const FRAME: Duration = FrameConfig::DEFAULT_FRAME_DELAY;

    #[test]
    fn render_gate_skips_early_frames_but_not_input() {
        let mut driver = driver((12, 10), &[(11, 9)], (4, 3));
        let mut input = Script::new(&[Buttons::RIGHT, Buttons::empty(), Buttons::empty()]);
        let mut renderer = Recorder::default();

        let first = driver.tick(Duration::ZERO, &mut input, &mut renderer).unwrap();
        let second = driver.tick(FRAME / 2, &mut input, &mut renderer).unwrap();
        let third = driver.tick(FRAME, &mut input, &mut renderer).unwrap();

        assert!(first.unwrap().rendered);
        let second = second.unwrap();
        assert!(second.report.moved);
        assert!(!second.rendered);
        assert!(third.unwrap().rendered);
        assert_eq!(renderer.0.len(), 2);
        assert_eq!(renderer.0[1].cursor, (5, 3));
    }

    #[test]
    fn frame_places_cursor_sprite() {
        let driver = driver((12, 10), &[(0, 0)], (11, 9));

        let frame = driver.frame();

        assert_eq!(frame.offset, (2, 2));
        assert_eq!(frame.cursor_px, (9 * 16, 7 * 16));
        assert_eq!(frame.tiles.size(), (10, 8));
        assert_eq!(frame.mines_left, 1);
    }

    #[test]
    fn exhausted_input_stops_run() {
        let mut driver = driver((3, 3), &[], (0, 0));
        let mut input = Script::new(&[Buttons::A, Buttons::empty()]);
        let mut renderer = Recorder::default();
        let mut now = Duration::ZERO;

        driver
            .run(
                || {
                    now += FRAME;
                    now
                },
                &mut input,
                &mut renderer,
            )
            .unwrap();

        assert_eq!(driver.session().state(), GameState::Won);
        assert_eq!(renderer.0.last().map(|f| f.state), Some(GameState::Won));
        assert_eq!(
            driver.tick(now, &mut input, &mut renderer).unwrap(),
            None
        );
    }

    #[test]
    fn renderer_errors_propagate() {
        struct Broken;
        impl Renderer for Broken {
            type Error = &'static str;
            fn draw(&mut self, _: &Frame) -> core::result::Result<(), &'static str> {
                Err("display unplugged")
            }
        }

        let mut driver = driver((3, 3), &[], (0, 0));
        let mut input = Script::new(&[Buttons::empty()]);

        assert_eq!(
            driver.tick(Duration::ZERO, &mut input, &mut Broken),
            Err(DriverError::Render("display unplugged"))
        );
    }
}
