use super::PlayerNumber;

/// One of the two batting positions at the crease.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CreaseEnd {
    Striker,
    NonStriker,
}

impl CreaseEnd {
    pub const fn other(self) -> Self {
        match self {
            Self::Striker => Self::NonStriker,
            Self::NonStriker => Self::Striker,
        }
    }
}

/// The two batters currently in; either slot is empty after a terminal wicket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crease {
    pub striker: Option<PlayerNumber>,
    pub non_striker: Option<PlayerNumber>,
}

impl Crease {
    pub const fn new(striker: PlayerNumber, non_striker: PlayerNumber) -> Self {
        Self {
            striker: Some(striker),
            non_striker: Some(non_striker),
        }
    }

    pub fn get(&self, end: CreaseEnd) -> Option<PlayerNumber> {
        match end {
            CreaseEnd::Striker => self.striker,
            CreaseEnd::NonStriker => self.non_striker,
        }
    }

    pub fn set(&mut self, end: CreaseEnd, batter: Option<PlayerNumber>) {
        match end {
            CreaseEnd::Striker => self.striker = batter,
            CreaseEnd::NonStriker => self.non_striker = batter,
        }
    }

    /// Which end `batter` currently occupies.
    pub fn end_of(&self, batter: PlayerNumber) -> Option<CreaseEnd> {
        if self.striker == Some(batter) {
            Some(CreaseEnd::Striker)
        } else if self.non_striker == Some(batter) {
            Some(CreaseEnd::NonStriker)
        } else {
            None
        }
    }

    /// Both batters, striker first, when the crease is full.
    pub fn pair(&self) -> Option<(PlayerNumber, PlayerNumber)> {
        Some((self.striker?, self.non_striker?))
    }

    pub fn is_full(&self) -> bool {
        self.striker.is_some() && self.non_striker.is_some()
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.striker, &mut self.non_striker);
    }

    pub fn clear(&mut self) {
        self.striker = None;
        self.non_striker = None;
    }
}
