//! Shape generation for a board snapshot
//!
//! Turns a snapshot into a flat list of 2D primitives in pixel space. The
//! canvas backend only has to execute them in order.

use crate::consts::{FRIENDS_PALETTE, TILE};
use crate::sim::{Cell, PowerupKind, Snapshot};

pub const BACKGROUND: &str = "#02111b";
pub const GRID_LINE: &str = "rgba(255,255,255,0.03)";
pub const OBSTACLE: &str = "#7b8a95";
pub const OBSTACLE_CRACK: &str = "#47525a";
pub const FOOD_BOX: &str = "#ff6b6b";
pub const FOOD_RIBBON: &str = "#ffd166";
pub const HEAD_OUTLINE: &str = "#ffffff55";
pub const SHIELD_TINT: &str = "rgba(255, 209, 102, 0.06)";

/// One drawing instruction
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: &'static str,
    },
    StrokeRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: &'static str,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: &'static str,
    },
    /// Closed polygon, filled
    Polygon {
        points: Vec<(f64, f64)>,
        color: &'static str,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        color: &'static str,
    },
}

/// Star (diamond) colour per powerup kind
pub fn powerup_color(kind: PowerupKind) -> &'static str {
    match kind {
        PowerupKind::Grow => "#ffd166",
        PowerupKind::Speed => "#ff6b6b",
        PowerupKind::Shield => "#4ecdc4",
        PowerupKind::Score => "#5f27cd",
    }
}

/// Snake segments cycle through the friends palette
pub fn segment_color(index: usize) -> &'static str {
    FRIENDS_PALETTE[index % FRIENDS_PALETTE.len()]
}

fn origin(cell: Cell) -> (f64, f64) {
    (f64::from(cell.x) * TILE, f64::from(cell.y) * TILE)
}

fn inset_rect(cell: Cell, inset: f64, color: &'static str) -> Shape {
    let (x, y) = origin(cell);
    Shape::Rect {
        x: x + inset,
        y: y + inset,
        w: TILE - 2.0 * inset,
        h: TILE - 2.0 * inset,
        color,
    }
}

fn diamond(cell: Cell, color: &'static str) -> Shape {
    let (x, y) = origin(cell);
    Shape::Polygon {
        points: vec![
            (x + TILE / 2.0, y + 4.0),
            (x + TILE - 4.0, y + TILE / 2.0),
            (x + TILE / 2.0, y + TILE - 4.0),
            (x + 4.0, y + TILE / 2.0),
        ],
        color,
    }
}

/// Build the full frame for a snapshot, back to front
pub fn frame(snapshot: &Snapshot<'_>) -> Vec<Shape> {
    let width = f64::from(snapshot.cols) * TILE;
    let height = f64::from(snapshot.rows) * TILE;
    let e = snapshot.entities;
    let mut shapes = Vec::with_capacity(
        2 + (snapshot.cols + snapshot.rows) as usize
            + e.obstacles.len() * 2
            + e.powerups.len()
            + e.snake.len()
            + e.friends.len()
            + 4,
    );

    shapes.push(Shape::Rect {
        x: 0.0,
        y: 0.0,
        w: width,
        h: height,
        color: BACKGROUND,
    });

    for col in 0..snapshot.cols {
        let x = f64::from(col) * TILE;
        shapes.push(Shape::Line {
            from: (x, 0.0),
            to: (x, height),
            color: GRID_LINE,
        });
    }
    for row in 0..snapshot.rows {
        let y = f64::from(row) * TILE;
        shapes.push(Shape::Line {
            from: (0.0, y),
            to: (width, y),
            color: GRID_LINE,
        });
    }

    for &o in &e.obstacles {
        shapes.push(inset_rect(o, 2.0, OBSTACLE));
        let (x, y) = origin(o);
        shapes.push(Shape::Line {
            from: (x + 4.0, y + TILE - 6.0),
            to: (x + TILE - 6.0, y + 4.0),
            color: OBSTACLE_CRACK,
        });
    }

    for p in &e.powerups {
        shapes.push(diamond(p.cell, powerup_color(p.kind)));
    }

    // Gift box with a ribbon cross
    if let Some(food) = e.food {
        let (x, y) = origin(food);
        let mid = (TILE / 2.0).floor();
        shapes.push(inset_rect(food, 4.0, FOOD_BOX));
        shapes.push(Shape::Rect {
            x: x + mid - 2.0,
            y: y + 3.0,
            w: 4.0,
            h: TILE - 6.0,
            color: FOOD_RIBBON,
        });
        shapes.push(Shape::Rect {
            x: x + 3.0,
            y: y + mid - 2.0,
            w: TILE - 6.0,
            h: 4.0,
            color: FOOD_RIBBON,
        });
    }

    // Tail first so the head is drawn on top
    for (i, &segment) in e.snake.iter().enumerate().rev() {
        shapes.push(inset_rect(segment, 2.0, segment_color(i)));
        if i == 0 {
            let (x, y) = origin(segment);
            shapes.push(Shape::StrokeRect {
                x: x + 2.0,
                y: y + 2.0,
                w: TILE - 4.0,
                h: TILE - 4.0,
                color: HEAD_OUTLINE,
            });
        }
    }

    for (idx, friend) in e.friends.iter().enumerate() {
        let (x, y) = origin(friend.cell);
        shapes.push(Shape::Circle {
            cx: x + TILE / 2.0,
            cy: y + TILE / 2.0 - (idx % 3) as f64,
            r: TILE / 5.0,
            color: FRIENDS_PALETTE[friend.color % FRIENDS_PALETTE.len()],
        });
    }

    if snapshot.shielded {
        shapes.push(Shape::Rect {
            x: 0.0,
            y: 0.0,
            w: width,
            h: height,
            color: SHIELD_TINT,
        });
    }

    shapes
}
