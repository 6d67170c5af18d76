//! Text console: the surfaces screens write to.
//!
//! Two configurations of the same protocol:
//! - `Single`: one shared surface that scrolls like a terminal
//! - `Split`: a persistent log plus a display that each render replaces

pub mod hit;
pub mod surface;

pub use surface::{
    ButtonSpan, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, OutputSurface, StyleRun, StyledSpan,
    SurfaceError,
};

/// How many surfaces the screens get.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleLayout {
    #[default]
    Single,
    Split,
}

/// The display surface plus an optional separate log.
#[derive(Debug, Default)]
pub struct Console {
    display: OutputSurface,
    log: Option<OutputSurface>,
}

impl Console {
    pub fn new(layout: ConsoleLayout) -> Self {
        match layout {
            ConsoleLayout::Single => Console::default(),
            ConsoleLayout::Split => Console {
                display: OutputSurface::new(),
                log: Some(OutputSurface::new()),
            },
        }
    }

    pub fn layout(&self) -> ConsoleLayout {
        if self.log.is_some() {
            ConsoleLayout::Split
        } else {
            ConsoleLayout::Single
        }
    }

    /// Where screens draw their current state.
    pub fn display(&mut self) -> &mut OutputSurface {
        &mut self.display
    }

    /// Where history goes (feedback, errors). Same as the display in
    /// single mode.
    pub fn log(&mut self) -> &mut OutputSurface {
        match &mut self.log {
            Some(log) => log,
            None => &mut self.display,
        }
    }

    /// Called by screens at the top of `render`.
    ///
    /// Split mode starts every render from an empty display; single mode
    /// keeps appending.
    pub fn begin_frame(&mut self) {
        if self.log.is_some() {
            self.display.clear();
        }
    }

    /// Empty every surface.
    pub fn clear(&mut self) {
        self.display.clear();
        if let Some(log) = &mut self.log {
            log.clear();
        }
    }

    pub fn display_surface(&self) -> &OutputSurface {
        &self.display
    }

    pub fn log_surface(&self) -> Option<&OutputSurface> {
        self.log.as_ref()
    }

    /// The surface that accumulates history and therefore scrolls.
    pub fn scrollback_surface(&self) -> &OutputSurface {
        self.log.as_ref().unwrap_or(&self.display)
    }

    /// Changes whenever any surface changes.
    pub fn revision(&self) -> u64 {
        let log = self.log.as_ref().map_or(0, OutputSurface::revision);
        self.display.revision().wrapping_add(log)
    }
}
