use core::ops::Mul;

/// Motor collaborator. Speed and direction are set independently, the last
/// direction call decides how the next speed is driven.
pub trait Wheel {
    fn set_speed(&mut self, speed: u32);
    fn forward(&mut self);
    fn backward(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Backward = -1,
    Forward = 1,
}
impl Mul for Direction {
    type Output = Direction;
    fn mul(self, rhs: Direction) -> Self::Output {
        if self == rhs {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WheelCommand {
    pub speed: u32,
    pub direction: Direction,
}
impl WheelCommand {
    pub fn forward(speed: u32) -> WheelCommand {
        WheelCommand {
            speed,
            direction: Direction::Forward,
        }
    }

    pub fn backward(speed: u32) -> WheelCommand {
        WheelCommand {
            speed,
            direction: Direction::Backward,
        }
    }
}

/// Which side of the robot the wall is on. The wheel on that side is the
/// inner wheel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DriveCommand {
    pub left: WheelCommand,
    pub right: WheelCommand,
}
impl DriveCommand {
    pub fn cruise(speed: u32) -> DriveCommand {
        DriveCommand {
            left: WheelCommand::forward(speed),
            right: WheelCommand::forward(speed),
        }
    }

    pub fn from_sides(wall_side: WallSide, inner: WheelCommand, outer: WheelCommand) -> Self {
        match wall_side {
            WallSide::Left => DriveCommand {
                left: inner,
                right: outer,
            },
            WallSide::Right => DriveCommand {
                left: outer,
                right: inner,
            },
        }
    }
}

/// Direction each motor turns for a forward command. Mirrored motors are
/// mounted `Backward`.
#[derive(Clone, Copy)]
pub struct WheelMounting {
    pub left: Direction,
    pub right: Direction,
}
impl Default for WheelMounting {
    fn default() -> WheelMounting {
        WheelMounting {
            left: Direction::Forward,
            right: Direction::Forward,
        }
    }
}

pub struct Wheels<L, R> {
    left: L,
    right: R,
    mounting: WheelMounting,
}
impl<L, R> Wheels<L, R>
where
    L: Wheel,
    R: Wheel,
{
    pub fn new(left: L, right: R, mounting: WheelMounting) -> Wheels<L, R> {
        Wheels {
            left,
            right,
            mounting,
        }
    }

    pub fn apply(&mut self, command: &DriveCommand) {
        drive(&mut self.left, self.mounting.left, command.left);
        drive(&mut self.right, self.mounting.right, command.right);
    }

    pub fn stop(&mut self) {
        self.left.set_speed(0);
        self.right.set_speed(0);
    }

    pub fn left(&self) -> &L {
        &self.left
    }

    pub fn right(&self) -> &R {
        &self.right
    }
}

fn drive<W: Wheel>(wheel: &mut W, mounting: Direction, command: WheelCommand) {
    wheel.set_speed(command.speed);
    match mounting * command.direction {
        Direction::Forward => wheel.forward(),
        Direction::Backward => wheel.backward(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Default)]
    pub(crate) struct MockWheel {
        pub speed: u32,
        pub direction: Option<Direction>,
        pub calls: usize,
    }
    impl Wheel for MockWheel {
        fn set_speed(&mut self, speed: u32) {
            self.speed = speed;
            self.calls += 1;
        }
        fn forward(&mut self) {
            self.direction = Some(Direction::Forward);
            self.calls += 1;
        }
        fn backward(&mut self) {
            self.direction = Some(Direction::Backward);
            self.calls += 1;
        }
    }

    #[test]
    fn direction_products() {
        assert_eq!(Direction::Forward * Direction::Forward, Direction::Forward);
        assert_eq!(Direction::Backward * Direction::Backward, Direction::Forward);
        assert_eq!(Direction::Forward * Direction::Backward, Direction::Backward);
    }

    #[test]
    fn sides_map_to_wheels() {
        let inner = WheelCommand::forward(120);
        let outer = WheelCommand::backward(380);

        let left_wall = DriveCommand::from_sides(WallSide::Left, inner, outer);
        assert_eq!(left_wall.left, inner);
        assert_eq!(left_wall.right, outer);

        let right_wall = DriveCommand::from_sides(WallSide::Right, inner, outer);
        assert_eq!(right_wall.left, outer);
        assert_eq!(right_wall.right, inner);
    }

    #[test]
    fn apply_honours_mounting() {
        let mounting = WheelMounting {
            left: Direction::Forward,
            right: Direction::Backward,
        };
        let mut wheels = Wheels::new(MockWheel::default(), MockWheel::default(), mounting);
        wheels.apply(&DriveCommand {
            left: WheelCommand::forward(130),
            right: WheelCommand::backward(250),
        });
        assert_eq!(wheels.left().speed, 130);
        assert_eq!(wheels.left().direction, Some(Direction::Forward));
        assert_eq!(wheels.right().speed, 250);
        assert_eq!(wheels.right().direction, Some(Direction::Forward));
    }

    #[test]
    fn stop_zeroes_speed() {
        let mut wheels = Wheels::new(
            MockWheel::default(),
            MockWheel::default(),
            WheelMounting::default(),
        );
        wheels.apply(&DriveCommand::cruise(200));
        wheels.stop();
        assert_eq!((wheels.left().speed, wheels.right().speed), (0, 0));
        assert_eq!(wheels.left().direction, Some(Direction::Forward));
    }
}
