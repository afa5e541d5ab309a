//! Interactive session: mine screen, surface messages and the surface menu.
//!
//! [`Session`] is the screen state machine and is driven by key events, so it
//! can be exercised without a terminal. [`run_game`] wraps it with the
//! crossterm event loop, the diff renderer and the rescue blink.

use std::collections::VecDeque;
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::core::{
    save_to_path, Cutscene, MenuOutcome, Simulation, SurfaceMenu, SurfaceReport,
};
use crate::input::{handle_key_event, handle_menu_key, is_confirm, should_quit};
use crate::term::{
    render_menu_into, render_report_into, FrameBuffer, MineView, TerminalRenderer, Viewport,
};
use crate::types::{RescueCause, RESCUE_BLINKS, RESCUE_BLINK_MS};

/// Which screen the session is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Mine,
    Report,
    Menu,
}

/// Whether the session loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    sim: Simulation,
    menu: SurfaceMenu,
    screen: Screen,
    reports: VecDeque<SurfaceReport>,
}

impl Session {
    /// New and loaded games both start in the mine.
    pub fn new(sim: Simulation) -> Self {
        Self {
            sim,
            menu: SurfaceMenu::new(),
            screen: Screen::Mine,
            reports: VecDeque::new(),
        }
    }

    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn menu(&self) -> &SurfaceMenu {
        &self.menu
    }

    /// The message currently on screen, if any.
    pub fn current_report(&self) -> Option<&SurfaceReport> {
        self.reports.front()
    }

    pub fn into_sim(self) -> Simulation {
        self.sim
    }

    pub fn handle_key(&mut self, key: KeyEvent, cutscene: &mut dyn Cutscene) -> Flow {
        match self.screen {
            Screen::Mine => {
                if should_quit(key) {
                    return Flow::Quit;
                }
                if let Some(action) = handle_key_event(key) {
                    self.sim.apply_action(action, cutscene);
                    if self.sim.has_surface_reports() {
                        self.reports.extend(self.sim.take_surface_reports());
                        self.screen = Screen::Report;
                    }
                }
            }
            Screen::Report => {
                if is_confirm(key) {
                    self.reports.pop_front();
                    if self.reports.is_empty() {
                        self.menu = SurfaceMenu::new();
                        self.screen = Screen::Menu;
                    }
                }
            }
            Screen::Menu => {
                if should_quit(key) {
                    return Flow::Quit;
                }
                if let Some(menu_key) = handle_menu_key(key) {
                    match self.menu.handle_key(menu_key, &mut self.sim) {
                        MenuOutcome::Stay => {}
                        MenuOutcome::ReturnToMine => self.screen = Screen::Mine,
                        MenuOutcome::Exit => return Flow::Quit,
                    }
                }
            }
        }
        Flow::Continue
    }

    pub fn render_into(&self, view: &MineView, viewport: Viewport, fb: &mut FrameBuffer) {
        match self.screen {
            Screen::Mine => view.render_into(&self.sim, viewport, fb),
            Screen::Report => match self.reports.front() {
                Some(report) => render_report_into(report, viewport, fb),
                None => render_menu_into(&self.menu, &self.sim, viewport, fb),
            },
            Screen::Menu => render_menu_into(&self.menu, &self.sim, viewport, fb),
        }
    }
}

/// Rescue cutscene that blinks the player glyph on the real terminal.
struct BlinkCutscene<'a> {
    term: &'a mut TerminalRenderer,
    fb: &'a mut FrameBuffer,
    view: &'a MineView,
    viewport: Viewport,
}

impl BlinkCutscene<'_> {
    fn frame(&mut self, sim: &Simulation, show_player: bool) -> Result<()> {
        self.view
            .render_into_with_player(sim, show_player, self.viewport, self.fb);
        self.term.draw_swap(self.fb)
    }
}

impl Cutscene for BlinkCutscene<'_> {
    fn rescue(&mut self, sim: &Simulation, cause: RescueCause) {
        log::debug!("rescue cutscene: {cause:?}");
        let pause = Duration::from_millis(RESCUE_BLINK_MS);
        for _ in 0..RESCUE_BLINKS {
            for show_player in [false, true] {
                if let Err(err) = self.frame(sim, show_player) {
                    log::warn!("rescue cutscene aborted: {err:#}");
                    return;
                }
                thread::sleep(pause);
            }
        }
    }
}

fn viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 34));
    Viewport::new(w, h)
}

/// Play until the player quits, then save to `save_path`.
pub fn run_game(sim: Simulation, save_path: &Path) -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter().context("failed to set up the terminal")?;

    let mut session = Session::new(sim);
    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    let sim = session.into_sim();
    save_to_path(&sim, save_path)
        .with_context(|| format!("failed to save game to {}", save_path.display()))?;
    log::info!("game saved to {}", save_path.display());
    Ok(())
}

fn run(term: &mut TerminalRenderer, session: &mut Session) -> Result<()> {
    let view = MineView::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let vp = viewport();
        session.render_into(&view, vp, &mut fb);
        term.draw_swap(&mut fb)?;

        // Turn-based: block until the next key.
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let mut cutscene = BlinkCutscene {
                    term: &mut *term,
                    fb: &mut fb,
                    view: &view,
                    viewport: vp,
                };
                if session.handle_key(key, &mut cutscene) == Flow::Quit {
                    return Ok(());
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}
