//! Pool ball data: colours, groups and node identifiers.

use std::fmt;

/// Which set a ball belongs to in eight-ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallGroup {
    Cue,
    /// Solids, 1-7.
    Low,
    Eight,
    /// Stripes, 9-15.
    High,
}

/// Pool ball definition.
#[derive(Debug, Clone, Copy)]
pub struct BallDef {
    pub number: u8,
    pub group: BallGroup,
    /// CSS colour name used for the legend swatch.
    pub colour: &'static str,
}

/// All 16 balls (cue + 15 numbered). Index == ball number.
pub const BALLS: [BallDef; 16] = [
    BallDef { number: 0, group: BallGroup::Cue, colour: "WHITE" },
    BallDef { number: 1, group: BallGroup::Low, colour: "YELLOW" },
    BallDef { number: 2, group: BallGroup::Low, colour: "BLUE" },
    BallDef { number: 3, group: BallGroup::Low, colour: "RED" },
    BallDef { number: 4, group: BallGroup::Low, colour: "PURPLE" },
    BallDef { number: 5, group: BallGroup::Low, colour: "ORANGE" },
    BallDef { number: 6, group: BallGroup::Low, colour: "GREEN" },
    BallDef { number: 7, group: BallGroup::Low, colour: "BROWN" },
    BallDef { number: 8, group: BallGroup::Eight, colour: "BLACK" },
    BallDef { number: 9, group: BallGroup::High, colour: "LIGHTYELLOW" },
    BallDef { number: 10, group: BallGroup::High, colour: "LIGHTBLUE" },
    BallDef { number: 11, group: BallGroup::High, colour: "PINK" },         // no LIGHTRED
    BallDef { number: 12, group: BallGroup::High, colour: "MEDIUMPURPLE" }, // no LIGHTPURPLE
    BallDef { number: 13, group: BallGroup::High, colour: "LIGHTSALMON" },  // no LIGHTORANGE
    BallDef { number: 14, group: BallGroup::High, colour: "LIGHTGREEN" },
    BallDef { number: 15, group: BallGroup::High, colour: "SANDYBROWN" },   // no LIGHTBROWN
];

/// A ball number in 0..=15, rendered on the wire as `ball-N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BallId(u8);

impl BallId {
    pub const CUE: BallId = BallId(0);

    pub fn new(number: u8) -> Option<Self> {
        (number < BALLS.len() as u8).then_some(Self(number))
    }

    /// Parse a `ball-N` node identifier.
    pub fn parse(id: &str) -> Option<Self> {
        id.strip_prefix("ball-")?.parse::<u8>().ok().and_then(Self::new)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn is_cue(self) -> bool {
        self.0 == 0
    }

    pub fn def(self) -> &'static BallDef {
        &BALLS[self.0 as usize]
    }

    /// The fifteen object balls, in legend order.
    pub fn object_balls() -> impl Iterator<Item = BallId> {
        (1..BALLS.len() as u8).map(BallId)
    }
}

impl fmt::Display for BallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ball-{}", self.0)
    }
}
