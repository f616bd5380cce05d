use std::collections::VecDeque;

use crate::brush::BrushSetting;

/// Active pointer tool. Pointer events only paint with the brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Cursor,
    Brush,
}

/// Everything a host can feed into the core between two steps.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Press {
        x: f64,
        y: f64,
    },
    Move {
        x: f64,
        y: f64,
        /// Whether the host still sees the pointer button held down.
        dragging: bool,
    },
    Release,
    SelectTool(Tool),
    Brush(BrushSetting),
    /// Raw token from an algorithm picker. Unknown tokens are accepted here and disable
    /// force computation until a known one arrives.
    SelectAlgorithm(String),
    SetPaused(bool),
    TogglePause,
}

/// FIFO of pending input, drained once at the start of every step.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
