//! Headless "move a ball" game used by the demo binaries
//!
//! Start begins a round, Back ends it and puts every ball back, A toggles a
//! ball's colour on press. Each ball follows its controller's left stick.

use crate::controller::{ButtonSnapshot, Stick};

/// Pixels per frame at full stick deflection
pub const MAX_SPEED: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallColor {
    White,
    Red,
}

impl BallColor {
    fn toggled(self) -> Self {
        match self {
            BallColor::White => BallColor::Red,
            BallColor::Red => BallColor::White,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub x: i32,
    pub y: i32,
    pub color: BallColor,
    home: (i32, i32),
    a_was_held: bool,
}

impl Ball {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            color: BallColor::White,
            home: (x, y),
            a_was_held: false,
        }
    }

    fn reset(&mut self) {
        (self.x, self.y) = self.home;
    }
}

/// What one controller contributed this frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub buttons: ButtonSnapshot,
    pub left_stick: Stick,
}

#[derive(Debug, Clone)]
pub struct Game {
    pub balls: Vec<Ball>,
    pub playing: bool,
    // Buttons held by each controller on the previous frame
    held: Vec<ButtonSnapshot>,
}

impl Game {
    pub fn new(balls: Vec<Ball>) -> Self {
        Self {
            balls,
            playing: false,
            held: Vec::new(),
        }
    }

    /// Advances one frame. `inputs[i]` drives `balls[i]`; extra entries on
    /// either side are ignored.
    pub fn step(&mut self, inputs: &[FrameInput]) {
        self.held.resize(inputs.len(), ButtonSnapshot::default());
        for (input, previous) in inputs.iter().zip(&self.held) {
            let start = input.buttons.start && !previous.start;
            let back = input.buttons.back && !previous.back;
            if !self.playing && start {
                self.playing = true;
            } else if self.playing && back {
                self.playing = false;
                self.balls.iter_mut().for_each(Ball::reset);
            }
        }
        for (previous, input) in self.held.iter_mut().zip(inputs) {
            *previous = input.buttons;
        }

        for (ball, input) in self.balls.iter_mut().zip(inputs) {
            if input.buttons.a && !ball.a_was_held {
                ball.color = ball.color.toggled();
            }
            ball.a_was_held = input.buttons.a;

            if self.playing {
                ball.x += (input.left_stick.x * MAX_SPEED) as i32;
                ball.y += (input.left_stick.y * MAX_SPEED) as i32;
            }
        }
    }
}
