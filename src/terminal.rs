//! Terminal update loop
//!
//! [`Terminal`] is the single owner of a [`Display`]: it turns content
//! events into render/diff/stream cycles and serializes every controller
//! access. Event production (vcs polling, signals, menus) happens in
//! collaborators outside the crate; they feed [`Event`]s in and act on
//! the returned [`Status`].

use embedded_hal::delay::DelayNs;

use crate::diff::{diff, Rect};
use crate::display::{Display, Region};
use crate::error::Error;
use crate::framebuffer::Frame;
use crate::interface::DisplayInterface;
use crate::render::{render, Cursor, RenderConfig, TextFont};

/// Input to one orchestrator step
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event<'a> {
    /// The terminal content changed; `text` is the full screen, lines
    /// separated by `\n`
    ContentChanged {
        /// Full screen text
        text: &'a str,
        /// Cursor to draw, if visible
        cursor: Option<Cursor>,
    },
    /// An interactive menu wants the panel
    MenuRequested,
    /// Drain residual charge with a black/white clear cycle
    ScrubRequested,
    /// Shut the loop down
    StopRequested,
}

/// Outcome of one orchestrator step
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Status {
    /// Nothing changed on the panel; zero bus writes happened
    Idle,
    /// The panel was updated
    Updated,
    /// Control should pass to the menu collaborator
    Menu,
    /// The loop is done; the controller is in deep sleep
    Stopped,
}

/// Event-driven display orchestrator
pub struct Terminal<I, F>
where
    I: DisplayInterface,
    F: TextFont,
{
    display: Display<I>,
    font: F,
    render_config: RenderConfig,
    /// Use the fast partial waveform for diff updates
    use_partial: bool,
    /// Last frame streamed to the panel
    previous: Option<Frame>,
}

impl<I, F> Terminal<I, F>
where
    I: DisplayInterface,
    F: TextFont,
{
    /// Create a terminal around an initialized or uninitialized display
    pub fn new(display: Display<I>, font: F, render_config: RenderConfig, use_partial: bool) -> Self {
        Self {
            display,
            font,
            render_config,
            use_partial,
            previous: None,
        }
    }

    /// Initialize the controller and clear the stored frame
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I>> {
        self.previous = None;
        self.display.init(delay)
    }

    /// Process one event
    ///
    /// Completes synchronously; every controller call it makes finishes
    /// its activation and busy-wait before returning, so no event can
    /// leave a half-sent frame behind.
    pub fn handle<D: DelayNs>(&mut self, event: Event<'_>, delay: &mut D) -> Result<Status, Error<I>> {
        match event {
            Event::ContentChanged { text, cursor } => self.content_changed(text, cursor, delay),
            Event::MenuRequested => Ok(Status::Menu),
            Event::ScrubRequested => {
                self.display.scrub(delay)?;
                let dims = *self.display.dimensions();
                self.previous = Some(Frame::new(dims.cols, dims.rows));
                Ok(Status::Updated)
            }
            Event::StopRequested => {
                self.display.sleep(delay)?;
                Ok(Status::Stopped)
            }
        }
    }

    /// Stream an externally produced frame
    ///
    /// The frame is conformed to panel dimensions first; a frame a
    /// collaborator built at the wrong size becomes a blank screen with
    /// a warning instead of an error.
    pub fn show_frame<D: DelayNs>(&mut self, frame: Frame, delay: &mut D) -> Result<Status, Error<I>> {
        let dims = *self.display.dimensions();
        let frame = frame.conform(dims.cols, dims.rows);
        self.update(frame, delay)
    }

    /// Access the owned display
    pub fn display(&self) -> &Display<I> {
        &self.display
    }

    fn content_changed<D: DelayNs>(
        &mut self,
        text: &str,
        cursor: Option<Cursor>,
        delay: &mut D,
    ) -> Result<Status, Error<I>> {
        let dims = *self.display.dimensions();
        let frame = render(dims, &self.font, text, cursor, &self.render_config);
        self.update(frame, delay)
    }

    fn update<D: DelayNs>(&mut self, frame: Frame, delay: &mut D) -> Result<Status, Error<I>> {
        let rect = match &self.previous {
            None => Some(Rect::new(0, 0, frame.width() - 1, frame.height() - 1)),
            Some(previous) => diff(previous, &frame),
        };

        let Some(rect) = rect else {
            // identical content, leave the bus untouched
            self.previous = Some(frame);
            return Ok(Status::Idle);
        };

        let buffer = frame.crop(&rect);
        let region = Region::new(rect.x_start, rect.y_start, rect.width(), rect.height());

        if self.use_partial && self.previous.is_some() {
            self.display.partial_refresh(&buffer, region, delay)?;
        } else {
            self.display.draw_region(&buffer, region, delay)?;
        }

        self.previous = Some(frame);
        Ok(Status::Updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::command::{BORDER_WAVEFORM, WRITE_RAM};
    use crate::config::{Builder, Dimensions};
    use alloc::vec::Vec;

    #[derive(Debug, Default)]
    struct MockInterface {
        commands: Vec<u8>,
        command_data: Vec<(u8, Vec<u8>)>,
        last_command: Option<u8>,
        writes: usize,
    }

    impl MockInterface {
        fn ram_writes(&self) -> usize {
            self.commands.iter().filter(|c| **c == WRITE_RAM).count()
        }

        fn data_for(&self, cmd: u8) -> Vec<&Vec<u8>> {
            self.command_data
                .iter()
                .filter(|(c, _)| *c == cmd)
                .map(|(_, data)| data)
                .collect()
        }
    }

    impl DisplayInterface for MockInterface {
        type Error = &'static str;

        fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
            self.commands.push(command);
            self.last_command = Some(command);
            self.writes += 1;
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            if let Some(cmd) = self.last_command {
                self.command_data.push((cmd, data.to_vec()));
            }
            self.writes += 1;
            Ok(())
        }

        fn reset<D: DelayNs>(&mut self, _delay: &mut D) {}

        fn reset_pulse<D: DelayNs>(&mut self, _delay: &mut D) {}

        fn busy_wait<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    struct MockDelay;
    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    /// Fills the character cell for anything that is not a space
    struct CellFont;

    impl TextFont for CellFont {
        fn glyph_width(&self) -> u16 {
            8
        }

        fn line_height(&self) -> u16 {
            10
        }

        fn draw_glyph(&self, ch: char, x: u16, y: u16, frame: &mut Frame) {
            if ch == ' ' {
                return;
            }
            for dy in 0..10 {
                for dx in 0..8 {
                    frame.set_pixel(x + dx, y + dy, Color::Black);
                }
            }
        }
    }

    fn terminal(use_partial: bool) -> Terminal<MockInterface, CellFont> {
        let config = Builder::new()
            .dimensions(Dimensions::new(250, 128).unwrap())
            .build()
            .unwrap();
        let display = Display::new(MockInterface::default(), config);
        let mut terminal = Terminal::new(display, CellFont, RenderConfig::default(), use_partial);
        terminal.init(&mut MockDelay).unwrap();
        terminal
    }

    #[test]
    fn test_first_frame_streams_full_panel() {
        let mut term = terminal(false);
        let status = term
            .handle(
                Event::ContentChanged {
                    text: "hello",
                    cursor: None,
                },
                &mut MockDelay,
            )
            .unwrap();
        assert_eq!(status, Status::Updated);
        let writes = term.display.interface_ref().data_for(WRITE_RAM);
        assert_eq!(writes.last().unwrap().len(), 16 * 250);
    }

    #[test]
    fn test_identical_content_is_idle_with_zero_writes() {
        let mut term = terminal(false);
        let event = Event::ContentChanged {
            text: "hello",
            cursor: None,
        };
        term.handle(event, &mut MockDelay).unwrap();
        let writes_before = term.display.interface_ref().writes;

        let status = term.handle(event, &mut MockDelay).unwrap();
        assert_eq!(status, Status::Idle);
        assert_eq!(term.display.interface_ref().writes, writes_before);
    }

    #[test]
    fn test_changed_content_streams_only_the_diff() {
        let mut term = terminal(false);
        term.handle(
            Event::ContentChanged {
                text: "aa",
                cursor: None,
            },
            &mut MockDelay,
        )
        .unwrap();

        // second cell turns into a space: 8x10 cell changes
        term.handle(
            Event::ContentChanged {
                text: "a ",
                cursor: None,
            },
            &mut MockDelay,
        )
        .unwrap();

        let writes = term.display.interface_ref().data_for(WRITE_RAM);
        assert_eq!(writes.last().unwrap().len(), 10);
    }

    #[test]
    fn test_partial_mode_reprograms_waveform() {
        let mut term = terminal(true);
        term.handle(
            Event::ContentChanged {
                text: "a",
                cursor: None,
            },
            &mut MockDelay,
        )
        .unwrap();
        term.handle(
            Event::ContentChanged {
                text: " ",
                cursor: None,
            },
            &mut MockDelay,
        )
        .unwrap();

        let borders = term.display.interface_ref().data_for(BORDER_WAVEFORM);
        assert_eq!(borders.last().unwrap()[..], [0x80]);
    }

    #[test]
    fn test_menu_event_touches_nothing() {
        let mut term = terminal(false);
        let writes_before = term.display.interface_ref().writes;
        let status = term.handle(Event::MenuRequested, &mut MockDelay).unwrap();
        assert_eq!(status, Status::Menu);
        assert_eq!(term.display.interface_ref().writes, writes_before);
    }

    #[test]
    fn test_scrub_event_runs_two_clear_passes() {
        let mut term = terminal(false);
        let ram_before = term.display.interface_ref().ram_writes();
        let status = term.handle(Event::ScrubRequested, &mut MockDelay).unwrap();
        assert_eq!(status, Status::Updated);
        assert_eq!(term.display.interface_ref().ram_writes(), ram_before + 2);
    }

    #[test]
    fn test_scrub_resets_the_stored_frame_to_white() {
        let mut term = terminal(false);
        term.handle(
            Event::ContentChanged {
                text: "a",
                cursor: None,
            },
            &mut MockDelay,
        )
        .unwrap();
        term.handle(Event::ScrubRequested, &mut MockDelay).unwrap();

        // redraw of the same text must now stream the glyph again
        let status = term
            .handle(
                Event::ContentChanged {
                    text: "a",
                    cursor: None,
                },
                &mut MockDelay,
            )
            .unwrap();
        assert_eq!(status, Status::Updated);
    }

    #[test]
    fn test_stop_sleeps_the_controller() {
        let mut term = terminal(false);
        let status = term.handle(Event::StopRequested, &mut MockDelay).unwrap();
        assert_eq!(status, Status::Stopped);
        assert!(term.display().is_sleeping());
    }

    #[test]
    fn test_show_frame_conforms_foreign_dimensions() {
        let mut term = terminal(false);
        // wrong-sized frame becomes a blank white full-panel stream
        let status = term.show_frame(Frame::new(64, 64), &mut MockDelay).unwrap();
        assert_eq!(status, Status::Updated);
        let writes = term.display.interface_ref().data_for(WRITE_RAM);
        let last = writes.last().unwrap();
        assert_eq!(last.len(), 16 * 250);
        assert!(last.iter().all(|byte| *byte == 0xFF));
    }
}
