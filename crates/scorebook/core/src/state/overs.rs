use std::fmt;

/// Position of a delivery: 0-indexed over plus 1-indexed legal ball.
///
/// Rendered the scorer's way, so wicket three of over four is `"4.3"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverBall {
    pub over: u32,
    pub ball: u32,
}

impl OverBall {
    pub const fn new(over: u32, ball: u32) -> Self {
        Self { over, ball }
    }

    /// `over + ball / 10`, the decimal used in fall-of-wicket listings.
    pub fn as_decimal(&self) -> f64 {
        f64::from(self.over) + f64::from(self.ball) / 10.0
    }
}

impl fmt::Display for OverBall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.over, self.ball)
    }
}

/// Overs bowled as a (completed overs, balls into the next over) pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OversBowled {
    pub completed: u32,
    pub balls: u32,
}

impl OversBowled {
    pub const ZERO: Self = Self {
        completed: 0,
        balls: 0,
    };

    pub const fn new(completed: u32, balls: u32) -> Self {
        Self { completed, balls }
    }

    /// Splits a legal-ball count into completed overs and remainder.
    pub fn from_legal_balls(legal_balls: u32, balls_per_over: u32) -> Self {
        let per_over = balls_per_over.max(1);
        Self {
            completed: legal_balls / per_over,
            balls: legal_balls % per_over,
        }
    }

    /// Legal deliveries these overs represent.
    pub fn legal_balls(&self, balls_per_over: u32) -> u32 {
        self.completed * balls_per_over + self.balls
    }

    /// Legal balls implied by the decimal notation: whole overs times the
    /// over length plus the digit after the point.
    pub fn legal_ball_equivalent(&self, balls_per_over: u32) -> u32 {
        self.legal_balls(balls_per_over)
    }

    /// Scorer's decimal notation: `3.4` is three overs and four balls.
    pub fn as_decimal(&self) -> f64 {
        f64::from(self.completed) + f64::from(self.balls) / 10.0
    }

    pub fn is_zero(&self) -> bool {
        self.completed == 0 && self.balls == 0
    }
}

impl fmt::Display for OversBowled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.completed, self.balls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_balls_split_into_overs() {
        assert_eq!(OversBowled::from_legal_balls(22, 6), OversBowled::new(3, 4));
        assert_eq!(OversBowled::from_legal_balls(6, 6), OversBowled::new(1, 0));
        assert_eq!(OversBowled::new(3, 4).legal_balls(6), 22);
        assert_eq!(OversBowled::new(3, 4).to_string(), "3.4");
    }

    #[test]
    fn over_ball_renders_as_decimal() {
        let at = OverBall::new(4, 3);
        assert_eq!(at.to_string(), "4.3");
        assert!((at.as_decimal() - 4.3).abs() < 1e-9);
    }
}
