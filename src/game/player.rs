use crate::agents::Personality;
use crate::hand::HoleCards;

/// One seat at the table.
///
/// `active` lasts for the session: it drops once the stack reaches zero and
/// never comes back. `playing` lasts for a hand: it drops on a fold.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Player {
    pub(crate) name: String,
    pub(crate) chips: u64,
    pub(crate) bet: u64,
    pub(crate) hole: Option<HoleCards>,
    pub(crate) active: bool,
    pub(crate) playing: bool,
    pub(crate) is_bot: bool,
    pub(crate) all_in: bool,
    pub(crate) personality: Personality,
}

impl Player {
    pub fn human(name: impl Into<String>, chips: u64) -> Self {
        Self::seat(name.into(), chips, false, Personality::default())
    }

    pub fn bot(name: impl Into<String>, chips: u64, personality: Personality) -> Self {
        Self::seat(name.into(), chips, true, personality)
    }

    fn seat(name: String, chips: u64, is_bot: bool, personality: Personality) -> Self {
        Self {
            name,
            chips,
            bet: 0,
            hole: None,
            active: true,
            playing: false,
            is_bot,
            all_in: false,
            personality,
        }
    }

    /// Returns the player's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the chips behind, not counting the current bet
    pub fn chips(&self) -> u64 {
        self.chips
    }

    /// Returns the chips put in so far this hand
    pub fn bet(&self) -> u64 {
        self.bet
    }

    /// Returns the player's hole cards
    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_bot(&self) -> bool {
        self.is_bot
    }

    pub fn is_all_in(&self) -> bool {
        self.all_in
    }

    pub fn personality(&self) -> Personality {
        self.personality
    }

    /// Whether the seat still has decisions to make this hand.
    pub(crate) fn can_act(&self) -> bool {
        self.playing && !self.all_in
    }

    /// Stack size counting what is already in front of the player.
    pub(crate) fn total(&self) -> u64 {
        self.chips + self.bet
    }
}
