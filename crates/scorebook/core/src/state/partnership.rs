use super::PlayerNumber;

/// Joint contribution of two batters between consecutive wickets.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Partnership {
    /// Survivor (or opening striker) who was in when the partnership began.
    pub batter1: PlayerNumber,
    pub batter2: PlayerNumber,
    /// The wicket that closes this partnership, 1-indexed.
    pub wicket_number: u32,
    pub start_score: u32,
    pub end_score: Option<u32>,
    /// Aggregate runs including extras.
    pub runs: u32,
    pub balls: u32,
    pub batter1_runs: u32,
    pub batter1_balls: u32,
    pub batter2_runs: u32,
    pub batter2_balls: u32,
}

impl Partnership {
    pub fn open(
        batter1: PlayerNumber,
        batter2: PlayerNumber,
        wicket_number: u32,
        start_score: u32,
    ) -> Self {
        Self {
            batter1,
            batter2,
            wicket_number,
            start_score,
            end_score: None,
            runs: 0,
            balls: 0,
            batter1_runs: 0,
            batter1_balls: 0,
            batter2_runs: 0,
            batter2_balls: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_score.is_none()
    }

    pub fn involves(&self, batter: PlayerNumber) -> bool {
        self.batter1 == batter || self.batter2 == batter
    }

    /// Credits one delivery faced by `batter`.
    ///
    /// `total` goes to the aggregate, `bat_runs` to the batter's share. A
    /// batter who is in neither slot only moves the aggregate.
    pub(crate) fn credit(&mut self, batter: PlayerNumber, total: u32, bat_runs: u32) {
        self.runs += total;
        self.balls += 1;
        if batter == self.batter1 {
            self.batter1_runs += bat_runs;
            self.batter1_balls += 1;
        } else if batter == self.batter2 {
            self.batter2_runs += bat_runs;
            self.batter2_balls += 1;
        }
    }

    pub(crate) fn close(&mut self, end_score: u32) {
        self.end_score = Some(end_score);
    }

    /// Runs and balls credited to `batter`, if they are part of this stand.
    pub fn share_of(&self, batter: PlayerNumber) -> Option<(u32, u32)> {
        if batter == self.batter1 {
            Some((self.batter1_runs, self.batter1_balls))
        } else if batter == self.batter2 {
            Some((self.batter2_runs, self.batter2_balls))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_attributes_by_player_number() {
        let mut stand = Partnership::open(PlayerNumber(1), PlayerNumber(2), 1, 0);
        stand.credit(PlayerNumber(2), 4, 4);
        stand.credit(PlayerNumber(1), 1, 0);
        assert_eq!(stand.runs, 5);
        assert_eq!(stand.balls, 2);
        assert_eq!((stand.batter1_runs, stand.batter1_balls), (0, 1));
        assert_eq!((stand.batter2_runs, stand.batter2_balls), (4, 1));
        assert_eq!(stand.share_of(PlayerNumber(2)), Some((4, 1)));
        assert_eq!(stand.share_of(PlayerNumber(9)), None);
        stand.close(5);
        assert!(!stand.is_open());
    }
}
