// Terminal image window: rendering plus the ImageViewer backed by crossterm
pub mod colors;
pub mod helpers;
pub mod input;

// Re-exports
pub use colors::*;
pub use helpers::format_file_size;
pub use input::{handle_key_event, KeyInput};

use crate::error::Result;
use crate::preview::ImageView;
use crate::session::ImageViewer;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type WindowTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Shows images on the alternate screen and reads single keystrokes in raw mode.
///
/// The window exists only between [`ImageViewer::show`] and
/// [`ImageViewer::close`]; the console is back in cooked mode otherwise so the
/// path prompts behave normally.
#[derive(Default)]
pub struct TerminalViewer {
    terminal: Option<WindowTerminal>,
    view: Option<ImageView>,
}

impl TerminalViewer {
    pub fn new() -> Self {
        Self::default()
    }

    fn redraw(&mut self) -> Result<()> {
        if let (Some(terminal), Some(view)) = (self.terminal.as_mut(), self.view.as_ref()) {
            terminal.draw(|frame| render_image_view(frame, view))?;
        }
        Ok(())
    }
}

impl ImageViewer for TerminalViewer {
    fn show(&mut self, view: ImageView) -> Result<()> {
        if self.terminal.is_none() {
            self.terminal = Some(open_window()?);
        }
        self.view = Some(view);
        self.redraw()
    }

    fn wait_for_key(&mut self) -> Result<KeyInput> {
        loop {
            match event::read()? {
                Event::Key(key) => return Ok(handle_key_event(key)),
                Event::Resize(_, _) => self.redraw()?,
                _ => {}
            }
        }
    }

    fn close(&mut self) -> Result<()> {
        self.view = None;
        if let Some(mut terminal) = self.terminal.take() {
            close_window(&mut terminal)?;
        }
        Ok(())
    }
}

impl Drop for TerminalViewer {
    fn drop(&mut self) {
        if let Some(mut terminal) = self.terminal.take() {
            close_window(&mut terminal).ok();
        }
    }
}

fn open_window() -> io::Result<WindowTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn close_window(terminal: &mut WindowTerminal) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Renders one image with its header and the key legend
pub fn render_image_view(frame: &mut Frame, view: &ImageView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(0),    // Image
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], view);
    render_image(frame, chunks[1], view);
    render_footer(frame, chunks[2]);
}

fn render_header(frame: &mut Frame, area: Rect, view: &ImageView) {
    let geometry = match view.dimensions() {
        Some((width, height)) => format!("{}×{} px", width, height),
        None => "preview unavailable".to_string(),
    };

    let title_line = Line::from(vec![
        Span::styled(
            " Image ",
            Style::default()
                .fg(ACCENT_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            view.name.clone(),
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    let info_line = Line::from(Span::styled(
        format!(" {} • {}", geometry, format_file_size(view.size)),
        Style::default().fg(TEXT_SECONDARY),
    ));

    let header = Paragraph::new(vec![title_line, info_line]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_COLOR)),
    );

    frame.render_widget(header, area);
}

fn render_image(frame: &mut Frame, area: Rect, view: &ImageView) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = view.to_lines(inner.width, inner.height);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };
    let label = |l: &'static str| Span::styled(l, Style::default().fg(TEXT_SECONDARY));

    let controls = Line::from(vec![
        key(" m ", ACCENT_PRIMARY),
        label("Move"),
        Span::raw("  │  "),
        key("c ", ACCENT_SECONDARY),
        label("Copy"),
        Span::raw("  │  "),
        key("s ", ACCENT_HIGHLIGHT),
        label("Skip"),
        Span::raw("  │  "),
        key("Ctrl+C ", TEXT_SECONDARY),
        label("Quit"),
    ]);

    let footer = Paragraph::new(controls)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(footer, area);
}
