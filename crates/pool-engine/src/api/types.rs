use serde::{Deserialize, Serialize};

/// Ball number on the table. 0 is the cue ball, 1..=15 are object balls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BallId(pub u8);

impl BallId {
    pub const CUE: BallId = BallId(0);
    pub const EIGHT: BallId = BallId(8);
    pub const NINE: BallId = BallId(9);

    pub fn is_cue(self) -> bool {
        self.0 == 0
    }
}

/// One of the two players sharing the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Index into per-player arrays (0 or 1).
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Human-facing player number (1 or 2).
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

/// 8-ball group: solids are 1-7, stripes are 9-15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    Solids,
    Stripes,
}

impl Group {
    pub fn other(self) -> Self {
        match self {
            Group::Solids => Group::Stripes,
            Group::Stripes => Group::Solids,
        }
    }

    /// The group a ball belongs to. Cue and 8-ball belong to none.
    pub fn of(id: BallId) -> Option<Group> {
        match id.0 {
            1..=7 => Some(Group::Solids),
            9..=15 => Some(Group::Stripes),
            _ => None,
        }
    }

    pub fn contains(self, id: BallId) -> bool {
        Group::of(id) == Some(self)
    }
}

/// Small set of ball numbers packed into a `u16`, one bit per ball.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BallMask(u16);

impl BallMask {
    pub fn insert(&mut self, id: BallId) {
        self.0 |= Self::bit(id);
    }

    pub fn contains(self, id: BallId) -> bool {
        self.0 & Self::bit(id) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Ball ids in ascending order.
    pub fn iter(self) -> impl Iterator<Item = BallId> {
        (0u8..16).map(BallId).filter(move |id| self.contains(*id))
    }

    fn bit(id: BallId) -> u16 {
        1u16 << (id.0 & 0x0F)
    }
}
