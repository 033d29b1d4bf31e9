//! Application state for the mind-map viewer.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

use crate::{
    document::resolve,
    generate::OutlineGenerator,
    layout::{
        worker::{GeometrySlot, LayoutResponse},
        LayoutMode, Viewport,
    },
    session::Session,
};

/// Pan step per key press, in screen pixels.
const PAN_STEP: f64 = 20.0;
/// Zoom limits, matching the render surface's scale extent.
const MIN_SCALE: f64 = 0.25;
const MAX_SCALE: f64 = 4.0;

pub struct App {
    pub session: Session<OutlineGenerator>,
    pub mode: LayoutMode,
    pub viewport: Viewport,
    pub slot: GeometrySlot,
    /// Bumped when an unrelated tree is loaded into this instance.
    pub epoch: u64,
    /// Index path of the currently selected node.
    pub selected: Vec<usize>,
    /// Pending label for a new child, while the user is typing one.
    pub input: Option<String>,
    /// Last error or notice for the status bar.
    pub status: Option<String>,
    pub should_exit: bool,
    needs_layout: bool,
}

impl App {
    pub fn new(session: Session<OutlineGenerator>) -> Self {
        Self {
            session,
            mode: LayoutMode::default(),
            viewport: Viewport::default(),
            slot: GeometrySlot::default(),
            epoch: 0,
            selected: Vec::new(),
            input: None,
            status: None,
            should_exit: false,
            needs_layout: true,
        }
    }

    /// Whether a new layout request should be fired, consuming the flag.
    pub fn take_needs_layout(&mut self) -> bool {
        std::mem::take(&mut self.needs_layout)
    }

    /// Swap in a layout response unless it is stale.
    pub fn apply_response(&mut self, response: LayoutResponse) {
        self.slot.apply(response);
    }

    /// Structural key of the selected node, for highlighting.
    pub fn selected_key(&self) -> Option<String> {
        let mut node = self.session.tree();
        let mut key = node.label.clone();
        for &idx in &self.selected {
            node = node.children.get(idx)?;
            key.push('/');
            key.push_str(&node.label);
        }
        Some(key)
    }

    pub fn handle_event(&mut self, event: &Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.input.is_some() {
            self.handle_input_key(key);
        } else {
            self.handle_normal_key(key);
        }
    }

    fn handle_input_key(&mut self, key: &KeyEvent) {
        let Some(buffer) = &mut self.input else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.input = None,
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Enter => {
                let label = self.input.take().unwrap_or_default();
                if !label.trim().is_empty() {
                    self.add_child(label.trim().to_string());
                }
            }
            KeyCode::Char(c) => buffer.push(c),
            _ => {}
        }
    }

    fn handle_normal_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_exit = true,
            KeyCode::Char('m') => {
                self.mode = self.mode.toggled();
                self.needs_layout = true;
            }
            KeyCode::Left => self.viewport.translate_x += PAN_STEP,
            KeyCode::Right => self.viewport.translate_x -= PAN_STEP,
            KeyCode::Up => self.viewport.translate_y += PAN_STEP,
            KeyCode::Down => self.viewport.translate_y -= PAN_STEP,
            KeyCode::Char('+' | '=') => {
                self.viewport.scale = (self.viewport.scale * 1.25).min(MAX_SCALE);
            }
            KeyCode::Char('-') => {
                self.viewport.scale = (self.viewport.scale * 0.8).max(MIN_SCALE);
            }
            KeyCode::Char('h') => {
                self.selected.pop();
            }
            KeyCode::Char('l') => self.select_first_child(),
            KeyCode::Char('j') => self.select_sibling(1),
            KeyCode::Char('k') => self.select_sibling(-1),
            KeyCode::Char('a') => self.input = Some(String::new()),
            KeyCode::Char('x') => self.remove_selected(),
            KeyCode::Char('e') => self.expand_selected(),
            _ => {}
        }
    }

    fn select_first_child(&mut self) {
        let has_children = resolve(self.session.tree(), &self.selected)
            .is_some_and(|n| !n.children.is_empty());
        if has_children {
            self.selected.push(0);
        }
    }

    fn select_sibling(&mut self, step: isize) {
        let Some(&last) = self.selected.last() else {
            return;
        };
        let parent_path = &self.selected[..self.selected.len() - 1];
        let Some(parent) = resolve(self.session.tree(), parent_path) else {
            return;
        };
        let next = last.saturating_add_signed(step);
        if next < parent.children.len() {
            let end = self.selected.len() - 1;
            self.selected[end] = next;
        }
    }

    fn add_child(&mut self, label: String) {
        match self.session.add_child(&self.selected.clone(), &label) {
            Ok(_) => {
                self.status = None;
                self.needs_layout = true;
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn remove_selected(&mut self) {
        if self.selected.is_empty() {
            self.status = Some("cannot remove the root".to_string());
            return;
        }
        match self.session.remove_node(&self.selected.clone()) {
            Ok(_) => {
                self.selected.pop();
                self.status = None;
                self.needs_layout = true;
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn expand_selected(&mut self) {
        match self.session.expand_node(&self.selected.clone()) {
            Ok(_) => {
                self.status = None;
                self.needs_layout = true;
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }
}
