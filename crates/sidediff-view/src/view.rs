//! The view model: current preferences plus a `render()` entry point.
//!
//! Every input or option change saves the preferences (when a store is
//! attached). Rows are rebuilt from scratch on each render.

use sidediff_core::{compare, count_lines, Row, RowSummary};
use tracing::{debug, info};

use crate::config::ViewConfig;
use crate::error::ViewResult;
use crate::prefs::{DiffMode, Preferences};
use crate::render::Renderer;
use crate::store::StateStore;

pub struct DiffView {
    prefs: Preferences,
    store: Option<StateStore>,
    config: ViewConfig,
}

impl DiffView {
    /// Open a view backed by `store`.
    ///
    /// On first run (nothing saved, or the saved state is unreadable) both
    /// sides start with the placeholder text and that state is saved
    /// immediately.
    pub fn open(store: StateStore, config: ViewConfig) -> ViewResult<Self> {
        let prefs = match store.load()? {
            Some(prefs) => prefs,
            None => {
                info!(path = ?store.path(), "no saved state, starting fresh");
                let prefs = Preferences::first_run();
                store.save(&prefs)?;
                prefs
            }
        };
        Ok(Self {
            prefs,
            store: Some(store),
            config,
        })
    }

    /// A view that never touches disk.
    pub fn in_memory(prefs: Preferences, config: ViewConfig) -> Self {
        Self {
            prefs,
            store: None,
            config,
        }
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn set_left(&mut self, text: impl Into<String>) -> ViewResult<()> {
        self.prefs.left = text.into();
        self.save()
    }

    pub fn set_right(&mut self, text: impl Into<String>) -> ViewResult<()> {
        self.prefs.right = text.into();
        self.save()
    }

    pub fn set_mode(&mut self, mode: DiffMode) -> ViewResult<()> {
        self.prefs.mode = mode;
        self.save()
    }

    pub fn set_ignore_whitespace(&mut self, ignore: bool) -> ViewResult<()> {
        self.prefs.ignore_whitespace = ignore;
        self.save()
    }

    /// Wrapping only changes layout, so the rows stay as they are.
    pub fn set_wrap(&mut self, wrap: bool) -> ViewResult<()> {
        self.prefs.wrap = wrap;
        self.save()
    }

    /// Exchange the left and right texts.
    pub fn swap(&mut self) -> ViewResult<()> {
        self.prefs.swap();
        self.save()
    }

    /// Line counts of the left and right inputs.
    pub fn line_counts(&self) -> (usize, usize) {
        (count_lines(&self.prefs.left), count_lines(&self.prefs.right))
    }

    pub fn rows(&self) -> Vec<Row> {
        compare(
            &self.prefs.left,
            &self.prefs.right,
            self.prefs.ignore_whitespace,
        )
    }

    /// Render the header, the aligned rows, and a summary line.
    pub fn render(&self) -> String {
        let rows = self.rows();
        let summary = RowSummary::from_rows(&rows);
        debug!(
            rows = rows.len(),
            changed = summary.changed,
            added = summary.added,
            deleted = summary.deleted,
            "rendering view"
        );

        let renderer = Renderer::new(self.config.width, self.prefs.mode)
            .wrap(self.prefs.wrap)
            .color(self.config.color);
        let (left_lines, right_lines) = self.line_counts();

        let mut out = String::new();
        let left_info = format!("Original ({left_lines} lines)");
        let pad = renderer.pane_width().saturating_sub(left_info.chars().count());
        out.push_str(&left_info);
        out.push_str(&" ".repeat(pad));
        out.push_str(&format!(" │ Modified ({right_lines} lines)\n"));
        out.push_str(&renderer.render(&rows));
        out.push_str(&summary_line(&summary));
        out
    }

    fn save(&self) -> ViewResult<()> {
        match &self.store {
            Some(store) => store.save(&self.prefs),
            None => Ok(()),
        }
    }
}

fn summary_line(summary: &RowSummary) -> String {
    if summary.is_identical() {
        return "No differences.\n".to_string();
    }
    format!(
        "{} changed, {} added, {} deleted, {} unchanged\n",
        summary.changed, summary.added, summary.deleted, summary.equal
    )
}
