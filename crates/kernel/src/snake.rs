use std::collections::VecDeque;

use cubesnake_common::{Cell, Coordinate, Direction};

/// The snake: a head cell, a heading and a body.
///
/// Body index 0 is the part right behind the head; the last part is the
/// tail. Only cells live here, renderable objects belong to presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    head: Cell,
    direction: Direction,
    body: VecDeque<Cell>,
}

impl Snake {
    /// A bare head with no body.
    pub fn new(head: Cell, direction: Direction) -> Self {
        Self {
            head,
            direction,
            body: VecDeque::new(),
        }
    }

    /// A snake with a prepared body, listed from the head towards the tail.
    pub fn with_body(
        head: Cell,
        direction: Direction,
        body: impl IntoIterator<Item = Cell>,
    ) -> Self {
        Self {
            head,
            direction,
            body: body.into_iter().collect(),
        }
    }

    pub fn head(&self) -> Cell {
        self.head
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Overwrite the heading. Reversing is allowed and will bite the body.
    pub fn turn(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn body(&self) -> impl ExactSizeIterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Head plus body parts.
    pub fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Always false: a snake has at least its head.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// True when a body part sits on `cell`. The head is not a body part.
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.iter().any(|part| *part == cell)
    }

    /// Head first, then the body towards the tail.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    /// Where the head would land before any border wrapping.
    pub fn next_coord(&self) -> Coordinate {
        self.head.coord + self.direction.delta()
    }

    /// Move the head to `to`, shifting every part one place towards it.
    /// Returns the cell that ends up empty.
    pub(crate) fn advance(&mut self, to: Cell) -> Cell {
        self.body.push_front(self.head);
        self.head = to;
        // Never empty: a part was just pushed.
        self.body.pop_back().unwrap_or(to)
    }

    /// Append a part at the tail end. Returns its index.
    pub(crate) fn grow(&mut self, at: Cell) -> usize {
        self.body.push_back(at);
        self.body.len() - 1
    }

    /// Remove the tail part. Returns the cell it occupied.
    pub(crate) fn remove_tail(&mut self) -> Option<Cell> {
        self.body.pop_back()
    }
}
