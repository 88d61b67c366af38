use std::collections::VecDeque;

use crate::Cell;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn offset(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// Head at the front, tail at the back.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Lays out `size` cells ending at `head`, trailing away from `direction`.
    pub fn new(head: Cell, size: usize, direction: Direction) -> Self {
        assert!(size > 0, "a snake needs at least one cell");
        let diff = direction.offset();

        let body = (0..size as i32)
            .map(|i| (head.0 - diff.0 * i, head.1 - diff.1 * i))
            .collect();
        Snake { body }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn body(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn move_head(&mut self, direction: Direction) -> Cell {
        let old_head = self.head();
        let diff = direction.offset();
        let new_head = (old_head.0 + diff.0, old_head.1 + diff.1);
        self.body.push_front(new_head);
        new_head
    }

    /// Returns the vacated tail cell, if any.
    pub fn grow_or_shrink(&mut self, ate_food: bool) -> Option<Cell> {
        if ate_food {
            None
        } else {
            self.body.pop_back()
        }
    }

    pub fn collides_with_self(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&cell| cell == head)
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 4] = [Up, Down, Left, Right];

    #[test]
    fn new_snake_trails_behind_head() {
        let snake = Snake::new((5, 5), 3, Right);
        assert_eq!(snake.body().copied().collect::<Vec<_>>(), vec![(5, 5), (4, 5), (3, 5)]);

        let snake = Snake::new((5, 5), 3, Up);
        assert_eq!(snake.body().copied().collect::<Vec<_>>(), vec![(5, 5), (5, 6), (5, 7)]);
    }

    #[test]
    fn move_is_exactly_one_cell() {
        for dir in ALL {
            let mut snake = Snake::new((10, 10), 3, Right);
            let old = snake.head();
            let new = snake.move_head(dir);
            let (dx, dy) = dir.offset();
            assert_eq!(new, (old.0 + dx, old.1 + dy));
            assert_eq!((new.0 - old.0).abs() + (new.1 - old.1).abs(), 1);
            assert_eq!(snake.head(), new);
        }
    }

    #[test]
    fn length_preserved_unless_fed() {
        for dir in [Up, Down, Right] {
            let mut snake = Snake::new((10, 10), 3, Right);
            snake.move_head(dir);
            assert_eq!(snake.grow_or_shrink(false), Some((8, 10)));
            assert_eq!(snake.len(), 3);

            snake.move_head(dir);
            assert_eq!(snake.grow_or_shrink(true), None);
            assert_eq!(snake.len(), 4);
        }
    }

    #[test]
    fn opposites() {
        for dir in ALL {
            assert_ne!(dir, dir.opposite());
            assert_eq!(dir.opposite().opposite(), dir);
        }
        assert_eq!(Left.opposite(), Right);
    }

    #[test]
    fn loop_back_into_body_collides() {
        let mut snake = Snake::new((10, 10), 5, Right);
        for dir in [Down, Left, Up] {
            snake.move_head(dir);
            snake.grow_or_shrink(false);
        }
        assert_eq!(snake.head(), (9, 10));
        assert!(snake.collides_with_self());
    }

    #[test]
    fn chasing_the_tail_is_safe() {
        // A length-4 square: the head steps into the cell the tail just left.
        let mut snake = Snake::new((10, 10), 4, Right);
        snake.move_head(Down);
        snake.grow_or_shrink(false);
        snake.move_head(Left);
        snake.grow_or_shrink(false);
        snake.move_head(Up);
        snake.grow_or_shrink(false);
        assert_eq!(snake.head(), (9, 10));
        assert!(!snake.collides_with_self());
    }

    #[test]
    fn occupancy() {
        let snake = Snake::new((5, 5), 3, Right);
        assert!(snake.occupies((3, 5)));
        assert!(!snake.occupies((6, 5)));
    }
}
